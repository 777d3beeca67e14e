//! Frontmatter parsing from markdown documents.
//!
//! Frontmatter is a `---`-delimited YAML block at the top of a document.
//! The engine only ever reads it for classification and seed metadata, so
//! parsing is deliberately lenient: anything malformed is treated as
//! "no frontmatter" and logged at debug level, never surfaced as an error.

use std::collections::BTreeMap;

/// Parsed frontmatter fields, keyed by top-level YAML key.
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    pub fields: BTreeMap<String, serde_yaml::Value>,
}

impl Frontmatter {
    /// A top-level string field, if present and a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(serde_yaml::Value::as_str)
    }

    /// A top-level field as a list of strings. Accepts both a YAML sequence
    /// and a single bare string; non-string sequence entries are dropped.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        match self.fields.get(key) {
            Some(serde_yaml::Value::String(s)) => vec![s.clone()],
            Some(serde_yaml::Value::Sequence(seq)) => seq
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// A top-level mapping field (used for namespaced config blocks).
    pub fn mapping(&self, key: &str) -> Option<&serde_yaml::Mapping> {
        self.fields.get(key).and_then(serde_yaml::Value::as_mapping)
    }
}

/// Parse the leading frontmatter block, if any.
///
/// Returns `None` when the document has no block, the block is unclosed,
/// or the YAML does not parse. The raw text is never modified; headings,
/// links, and region markers are all located on the full document text.
pub fn parse(content: &str) -> Option<Frontmatter> {
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix('\n')
        .or_else(|| rest.strip_prefix("\r\n"))?;

    let end = closing_delimiter(rest)?;
    let yaml = &rest[..end];
    if yaml.trim().is_empty() {
        return Some(Frontmatter::default());
    }
    match serde_yaml::from_str::<BTreeMap<String, serde_yaml::Value>>(yaml) {
        Ok(fields) => Some(Frontmatter { fields }),
        Err(e) => {
            tracing::debug!("ignoring malformed frontmatter: {e}");
            None
        }
    }
}

/// Byte offset of the closing `---` line within `content`.
fn closing_delimiter(content: &str) -> Option<usize> {
    let mut pos = 0;
    for line in content.split('\n') {
        if line.trim_end_matches('\r').trim() == "---" {
            return Some(pos);
        }
        pos += line.len() + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_frontmatter() {
        assert!(parse("# Hello\n\nSome content").is_none());
    }

    #[test]
    fn simple_fields() {
        let fm = parse("---\ntitle: Hello\ntype: moc\n---\n# Content").unwrap();
        assert_eq!(fm.str_field("title"), Some("Hello"));
        assert_eq!(fm.str_field("type"), Some("moc"));
    }

    #[test]
    fn tag_list_and_bare_string() {
        let fm = parse("---\ntags:\n  - rust\n  - cli\n---\nBody").unwrap();
        assert_eq!(fm.string_list("tags"), vec!["rust", "cli"]);

        let fm = parse("---\ntags: solo\n---\nBody").unwrap();
        assert_eq!(fm.string_list("tags"), vec!["solo"]);
    }

    #[test]
    fn non_string_list_entries_dropped() {
        let fm = parse("---\ntags:\n  - ok\n  - 42\n  - [nested]\n---\n").unwrap();
        assert_eq!(fm.string_list("tags"), vec!["ok"]);
    }

    #[test]
    fn unclosed_block_is_no_frontmatter() {
        assert!(parse("---\ntitle: Hello\n# Content").is_none());
    }

    #[test]
    fn malformed_yaml_is_no_frontmatter() {
        assert!(parse("---\ntitle: [unclosed\n---\nBody").is_none());
    }

    #[test]
    fn empty_block() {
        let fm = parse("---\n---\n# Content").unwrap();
        assert!(fm.fields.is_empty());
    }

    #[test]
    fn namespaced_mapping() {
        let fm = parse("---\nhub:\n  auto_gather_seeds: true\n---\n").unwrap();
        let hub = fm.mapping("hub").unwrap();
        assert!(hub.get("auto_gather_seeds").is_some());
    }
}
