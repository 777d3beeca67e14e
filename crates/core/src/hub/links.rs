//! Link occurrence scanning and normalization.
//!
//! Scanning (the upstream-indexer role) and normalization are split on
//! purpose: [`resolve_links`] never re-scans text for link syntax, it only
//! normalizes the occurrences it is given and attaches positional context.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::types::{LinkReference, Region};

// Matches [[target]], [[target|alias]], [[target#section|alias]] and the
// embed form ![[target]]. Embeds are treated identically to links.
static WIKILINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[\[([^\[\]]+)\]\]").unwrap());

/// A raw link occurrence: the target string as written, plus its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence {
    /// Raw target, possibly carrying `#section` and `|alias` parts.
    pub target: String,
    /// Zero-based line index.
    pub line: usize,
    /// Byte column of the occurrence's first character within its line.
    pub column: usize,
}

/// Discover wikilink and embed occurrences in raw text, in document order.
pub fn scan_occurrences(text: &str) -> Vec<LinkOccurrence> {
    let mut occurrences = Vec::new();
    for (line, raw) in text.split('\n').enumerate() {
        for cap in WIKILINK_RE.captures_iter(raw) {
            let whole = cap.get(0).map(|m| m.start()).unwrap_or(0);
            occurrences.push(LinkOccurrence {
                target: cap[1].to_string(),
                line,
                column: whole,
            });
        }
    }
    occurrences
}

/// Normalize occurrences into [`LinkReference`] records.
///
/// Splits `target|alias`, drops `#section` anchors from the target, and
/// classifies region membership by absolute character offset. The offset of
/// an occurrence is the sum of the lengths of all preceding lines (each
/// plus one for the terminator) plus its column. Membership uses the
/// half-open interval `[start, end)`: a link sitting exactly at the end
/// marker is outside the region. Output order matches input order.
pub fn resolve_links(
    text: &str,
    occurrences: &[LinkOccurrence],
    heading_map: &HashMap<usize, String>,
    region: Option<Region>,
) -> Vec<LinkReference> {
    let line_starts = line_start_offsets(text);

    occurrences
        .iter()
        .map(|occ| {
            let (target_part, alias) = match occ.target.split_once('|') {
                Some((t, a)) => (t, Some(a)),
                None => (occ.target.as_str(), None),
            };
            let target = target_part.split('#').next().unwrap_or(target_part);
            let display = alias.unwrap_or(target);

            let offset = line_starts.get(occ.line).copied().unwrap_or(0) + occ.column;
            let in_region = region.map_or(false, |r| r.contains(offset));

            LinkReference {
                target_path: target.to_string(),
                display_text: display.to_string(),
                enclosing_heading: heading_map.get(&occ.line).cloned(),
                line: occ.line,
                in_region,
            }
        })
        .collect()
}

/// Absolute character offset of the start of each line.
fn line_start_offsets(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in text.split('\n') {
        starts.push(offset);
        offset += line.len() + 1;
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn resolve_one(raw: &str) -> LinkReference {
        let occ = LinkOccurrence { target: raw.to_string(), line: 0, column: 0 };
        resolve_links("irrelevant", &[occ], &HashMap::new(), None)
            .into_iter()
            .next()
            .unwrap()
    }

    #[rstest]
    #[case("Note#Section|Alias", "Note", "Alias")]
    #[case("Note|Alias", "Note", "Alias")]
    #[case("Note", "Note", "Note")]
    #[case("Note#Section", "Note", "Note")]
    #[case("path/to/Note|Alias", "path/to/Note", "Alias")]
    fn normalization(
        #[case] raw: &str,
        #[case] target: &str,
        #[case] display: &str,
    ) {
        let link = resolve_one(raw);
        assert_eq!(link.target_path, target);
        assert_eq!(link.display_text, display);
    }

    #[test]
    fn scans_links_and_embeds_in_order() {
        let text = "see [[One]] then ![[Two]]\nand [[Three|t]]\n";
        let occs = scan_occurrences(text);
        assert_eq!(occs.len(), 3);
        assert_eq!(occs[0].target, "One");
        assert_eq!(occs[0].line, 0);
        assert_eq!(occs[1].target, "Two");
        assert_eq!(occs[2].target, "Three|t");
        assert_eq!(occs[2].line, 1);
    }

    #[test]
    fn embed_column_points_at_the_bang() {
        let occs = scan_occurrences("x ![[Two]]");
        assert_eq!(occs[0].column, 2);
    }

    #[test]
    fn offsets_accumulate_line_lengths() {
        // "ab\ncd [[X]]\n" -> line 1 starts at offset 3, link at column 3.
        let text = "ab\ncd [[X]]\n";
        let occs = scan_occurrences(text);
        assert_eq!(occs[0].line, 1);
        assert_eq!(occs[0].column, 3);

        let region = Region { start: 6, end: 7 };
        let links = resolve_links(text, &occs, &HashMap::new(), Some(region));
        assert!(links[0].in_region); // offset 3 + 3 = 6 == start, inside
    }

    #[test]
    fn link_at_region_end_is_outside() {
        let text = "ab\ncd [[X]]\n";
        let occs = scan_occurrences(text);
        // offset of the link is 6; a region ending exactly there excludes it
        let region = Region { start: 0, end: 6 };
        let links = resolve_links(text, &occs, &HashMap::new(), Some(region));
        assert!(!links[0].in_region);
    }

    #[test]
    fn no_region_means_nothing_in_region() {
        let links = resolve_links(
            "[[X]]",
            &scan_occurrences("[[X]]"),
            &HashMap::new(),
            None,
        );
        assert!(!links[0].in_region);
    }

    #[test]
    fn enclosing_heading_from_map() {
        let text = "# Top\n[[X]]\n";
        let occs = scan_occurrences(text);
        let mut map = HashMap::new();
        map.insert(1usize, "Top".to_string());
        let links = resolve_links(text, &occs, &map, None);
        assert_eq!(links[0].enclosing_heading.as_deref(), Some("Top"));
    }
}
