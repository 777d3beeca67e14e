//! Tag discovery shared by classification, the seed catalog, and the
//! change watcher.
//!
//! Tags come from two places: inline `#tag` tokens in the body and the
//! frontmatter `tags:` field (string or list). All comparisons in the
//! engine are case-insensitive, so everything is lowercased here.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::frontmatter::Frontmatter;

static INLINE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Matches #tag, #nested/tag, #multi-word_tag. Must not be preceded by
    // a word character so "c#4" is not a tag.
    Regex::new(r"(?:^|[^\w#])#([A-Za-z][\w/-]*)").unwrap()
});

/// Collect inline `#tag` tokens from raw text, lowercased.
pub fn inline_tags(text: &str) -> BTreeSet<String> {
    INLINE_TAG_RE
        .captures_iter(text)
        .map(|cap| cap[1].to_lowercase())
        .collect()
}

/// All tags carried by a document: frontmatter `tags:` plus inline tags.
pub fn document_tags(frontmatter: Option<&Frontmatter>, body: &str) -> BTreeSet<String> {
    let mut tags = inline_tags(body);
    if let Some(fm) = frontmatter {
        for tag in fm.string_list("tags") {
            tags.insert(tag.trim_start_matches('#').to_lowercase());
        }
    }
    tags
}

/// Cheap presence check used by the change watcher: does the raw text carry
/// any of the given tags? Scans inline tokens and the frontmatter block as
/// plain text; never runs a full parse.
pub fn has_any_tag(text: &str, wanted: &[String]) -> bool {
    if wanted.is_empty() {
        return false;
    }
    let wanted: Vec<String> = wanted.iter().map(|w| w.to_lowercase()).collect();
    for cap in INLINE_TAG_RE.captures_iter(text) {
        if wanted.iter().any(|w| *w == cap[1].to_lowercase()) {
            return true;
        }
    }
    // Frontmatter tags are written bare ("tags: [seed]"); token-match inside
    // the leading `---` block without parsing YAML.
    let mut lines = text.lines();
    if lines.next().map(str::trim) != Some("---") {
        return false;
    }
    for line in lines.take(64) {
        if line.trim() == "---" {
            break;
        }
        let lower = line.to_lowercase();
        let mut tokens = lower
            .split(|c: char| !(c.is_alphanumeric() || c == '/' || c == '-' || c == '_'));
        if tokens.any(|tok| !tok.is_empty() && wanted.iter().any(|w| w == tok)) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_inline_tags() {
        let tags = inline_tags("Idea about #Rust and #systems/design here");
        assert!(tags.contains("rust"));
        assert!(tags.contains("systems/design"));
    }

    #[test]
    fn ignores_mid_word_hashes() {
        let tags = inline_tags("c#4 is a note, not a tag");
        assert!(tags.is_empty());
    }

    #[test]
    fn cheap_check_sees_inline_tag() {
        assert!(has_any_tag("a note about #seed things", &["seed".to_string()]));
        assert!(!has_any_tag("nothing tagged here", &["seed".to_string()]));
    }

    #[test]
    fn cheap_check_sees_frontmatter_tag() {
        let text = "---\ntags: [seed, idea]\n---\n# Note\n";
        assert!(has_any_tag(text, &["seed".to_string()]));
    }
}
