//! Heading tree construction and the line → enclosing-heading map.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::types::Heading;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

/// Parse all headings into a nested tree with a single stack-based pass.
///
/// For each heading, the stack is popped while its top has a level greater
/// than or equal to the new heading; the popped node is complete and
/// attaches to the new stack top (or becomes a root). O(n) in heading
/// count. A document with no headings yields an empty tree.
pub fn parse_headings(text: &str) -> Vec<Heading> {
    let mut roots: Vec<Heading> = Vec::new();
    let mut stack: Vec<Heading> = Vec::new();

    for (line, raw) in text.split('\n').enumerate() {
        let raw = raw.trim_end_matches('\r');
        let Some(cap) = HEADING_RE.captures(raw) else {
            continue;
        };
        let level = cap[1].len() as u8;
        let heading = Heading {
            level,
            text: cap[2].trim().to_string(),
            line,
            children: Vec::new(),
        };

        while stack.last().map_or(false, |top| top.level >= level) {
            if let Some(done) = stack.pop() {
                attach(done, &mut stack, &mut roots);
            }
        }
        stack.push(heading);
    }

    while let Some(done) = stack.pop() {
        attach(done, &mut stack, &mut roots);
    }
    roots
}

fn attach(node: Heading, stack: &mut [Heading], roots: &mut Vec<Heading>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Build the line → enclosing-heading-text lookup.
///
/// Every line from a heading up to its first child (or its next sibling, or
/// the end of the document) maps to that heading's text. Child ranges are
/// assigned within the parent's scope, so the nearest enclosing heading
/// always wins. No headings means an empty map.
pub fn build_heading_map(
    headings: &[Heading],
    total_lines: usize,
) -> HashMap<usize, String> {
    let mut map = HashMap::new();
    assign_scopes(headings, total_lines, &mut map);
    map
}

fn assign_scopes(
    siblings: &[Heading],
    scope_end: usize,
    map: &mut HashMap<usize, String>,
) {
    for (i, heading) in siblings.iter().enumerate() {
        let end = siblings
            .get(i + 1)
            .map(|next| next.line)
            .unwrap_or(scope_end);
        let direct_end = heading
            .children
            .first()
            .map(|child| child.line)
            .unwrap_or(end);
        for line in heading.line..direct_end {
            map.insert(line, heading.text.clone());
        }
        assign_scopes(&heading.children, end, map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting_one_two_three_two() {
        let text = "# Root\n## First\n### Deep\n## Second\n";
        let tree = parse_headings(text);

        assert_eq!(tree.len(), 1);
        let root = &tree[0];
        assert_eq!(root.text, "Root");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].text, "First");
        assert_eq!(root.children[0].children.len(), 1);
        assert_eq!(root.children[0].children[0].text, "Deep");
        assert_eq!(root.children[1].text, "Second");
        assert!(root.children[1].children.is_empty());
    }

    #[test]
    fn sibling_roots_and_level_skips() {
        let text = "## A\n#### Deep under A\n## B\n# Top\n";
        let tree = parse_headings(text);

        assert_eq!(tree.len(), 3);
        assert_eq!(tree[0].text, "A");
        assert_eq!(tree[0].children[0].text, "Deep under A");
        assert_eq!(tree[1].text, "B");
        assert_eq!(tree[2].text, "Top");
    }

    #[test]
    fn no_headings_yields_empty_tree_and_map() {
        let text = "just prose\nand more prose\n";
        let tree = parse_headings(text);
        assert!(tree.is_empty());
        assert!(build_heading_map(&tree, 2).is_empty());
    }

    #[test]
    fn seven_hashes_is_not_a_heading() {
        let tree = parse_headings("####### too deep\n###### fine\n");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].level, 6);
    }

    #[test]
    fn hash_without_space_is_not_a_heading() {
        assert!(parse_headings("#tag on a line\n").is_empty());
    }

    #[test]
    fn heading_map_nearest_wins() {
        let text = "# Root\nunder root\n## Child\nunder child\nstill child\n## Sibling\ntail\n";
        let tree = parse_headings(text);
        let map = build_heading_map(&tree, 7);

        assert_eq!(map.get(&0).map(String::as_str), Some("Root"));
        assert_eq!(map.get(&1).map(String::as_str), Some("Root"));
        assert_eq!(map.get(&2).map(String::as_str), Some("Child"));
        assert_eq!(map.get(&4).map(String::as_str), Some("Child"));
        assert_eq!(map.get(&5).map(String::as_str), Some("Sibling"));
        assert_eq!(map.get(&6).map(String::as_str), Some("Sibling"));
    }

    #[test]
    fn heading_map_lines_before_first_heading_unmapped() {
        let text = "intro\n# First\nbody\n";
        let tree = parse_headings(text);
        let map = build_heading_map(&tree, 3);
        assert!(map.get(&0).is_none());
        assert_eq!(map.get(&2).map(String::as_str), Some("First"));
    }
}
