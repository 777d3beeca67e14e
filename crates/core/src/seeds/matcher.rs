//! Matching seed notes against a hub's tag filter.

use chrono::{DateTime, Utc};

use crate::hub::HubDocument;

use super::catalog::SeedCatalog;
use super::types::SeedNote;

/// Seeds that should be gathered into `hub`, newest first.
///
/// Filters in three steps: tag-set intersection with the hub's seed tags
/// (case-insensitive), exclusion of seeds already linked from the region,
/// and an optional `since` floor that drops seeds created strictly before
/// it. Already-linked means the seed's path, path without extension,
/// basename, or title appears among the in-region link targets; generated
/// lines link by title, so the title check is what keeps a re-edited seed
/// from being gathered twice.
///
/// The newest-first ordering is a hard contract: the patch engine inserts
/// lines in exactly this order.
pub fn find_matching_seeds(
    hub: &HubDocument,
    catalog: &SeedCatalog,
    since: Option<DateTime<Utc>>,
) -> Vec<SeedNote> {
    let linked = hub.in_region_targets();

    let mut matches: Vec<SeedNote> = catalog
        .query(&hub.seed_tags)
        .into_iter()
        .filter(|seed| seed.path != hub.path)
        .filter(|seed| {
            let path = seed.path.to_string_lossy();
            !(linked.contains(path.as_ref())
                || linked.contains(seed.path_sans_ext().as_str())
                || linked.contains(seed.basename().as_str())
                || linked.contains(seed.title.as_str()))
        })
        .filter(|seed| since.map_or(true, |floor| seed.created_at >= floor))
        .collect();

    matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::hub::parser::parse_hub;
    use chrono::TimeZone;
    use std::collections::BTreeSet;
    use std::path::{Path, PathBuf};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn seed(path: &str, tags: &[&str], created: i64) -> SeedNote {
        SeedNote {
            path: PathBuf::from(path),
            title: Path::new(path)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: at(created),
            excerpt: String::new(),
        }
    }

    fn hub_with_links(region_targets: &[&str]) -> HubDocument {
        let mut text = String::from(
            "---\ntype: moc\nhub:\n  auto_gather_seeds: true\n  seed_tags: [rust]\n---\n<!-- BEGIN AUTO -->\n",
        );
        for t in region_targets {
            text.push_str(&format!("- [[{t}]]\n"));
        }
        text.push_str("<!-- END AUTO -->\n");
        parse_hub(Path::new("maps/hub.md"), &text, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn intersects_tags_case_insensitively() {
        let catalog = SeedCatalog::from_seeds(vec![
            seed("a.md", &["rust"], 1),
            seed("b.md", &["golang"], 2),
        ]);
        let hub = hub_with_links(&[]);
        let found = find_matching_seeds(&hub, &catalog, None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, PathBuf::from("a.md"));
    }

    #[test]
    fn already_linked_seeds_excluded_by_basename_and_path() {
        let catalog = SeedCatalog::from_seeds(vec![
            seed("notes/linked.md", &["rust"], 1),
            seed("notes/by-path.md", &["rust"], 2),
            seed("notes/fresh.md", &["rust"], 3),
        ]);
        let hub = hub_with_links(&["linked", "notes/by-path"]);
        let found = find_matching_seeds(&hub, &catalog, None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, PathBuf::from("notes/fresh.md"));
    }

    #[test]
    fn already_linked_seeds_excluded_by_title() {
        // generated lines link by title, which may differ from the basename
        let mut titled = seed("notes/borrowck.md", &["rust"], 1);
        titled.title = "Borrow Checker".to_string();
        let catalog = SeedCatalog::from_seeds(vec![titled]);

        let hub = hub_with_links(&["Borrow Checker"]);
        assert!(find_matching_seeds(&hub, &catalog, None).is_empty());
    }

    #[test]
    fn since_floor_is_exclusive_below() {
        let catalog = SeedCatalog::from_seeds(vec![
            seed("old.md", &["rust"], 5),
            seed("edge.md", &["rust"], 10),
            seed("new.md", &["rust"], 15),
        ]);
        let hub = hub_with_links(&[]);
        let found = find_matching_seeds(&hub, &catalog, Some(at(10)));
        let paths: Vec<_> = found.iter().map(|s| s.path.clone()).collect();
        // strictly-before excluded; created exactly at the floor stays
        assert_eq!(paths, vec![PathBuf::from("new.md"), PathBuf::from("edge.md")]);
    }

    #[test]
    fn newest_first_ordering() {
        let catalog = SeedCatalog::from_seeds(vec![
            seed("t1.md", &["rust"], 100),
            seed("t2.md", &["rust"], 200),
        ]);
        let hub = hub_with_links(&[]);
        let found = find_matching_seeds(&hub, &catalog, None);
        assert_eq!(found[0].path, PathBuf::from("t2.md"));
        assert_eq!(found[1].path, PathBuf::from("t1.md"));
    }

    #[test]
    fn hub_itself_never_matches() {
        let mut own = seed("maps/hub.md", &["rust"], 1);
        own.tags = BTreeSet::from(["rust".to_string()]);
        let catalog = SeedCatalog::from_seeds(vec![own]);
        let hub = hub_with_links(&[]);
        assert!(find_matching_seeds(&hub, &catalog, None).is_empty());
    }
}
