//! Hub document classification and assembly.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::EngineConfig;
use crate::frontmatter::{self, Frontmatter};
use crate::tags;

use super::headings::{build_heading_map, parse_headings};
use super::links::{resolve_links, scan_occurrences};
use super::region::locate_region;
use super::types::{DetectionMethod, HubDocument, UpdateFrequency};

/// Frontmatter key of the namespaced living-hub config block.
const HUB_NAMESPACE: &str = "hub";
/// Frontmatter field consulted for field-based classification.
const TYPE_FIELD: &str = "type";

/// Classify a document as a hub, or `None`.
///
/// Rules in priority order; the first match wins and is recorded:
/// 1. frontmatter `type:` equals the configured value (case-insensitive);
/// 2. the configured tag appears inline or in the frontmatter tag list;
/// 3. the path contains an include-folder substring, unless it also
///    contains an exclude-folder substring (exclude wins).
pub fn classify(
    path: &Path,
    text: &str,
    fm: Option<&Frontmatter>,
    config: &EngineConfig,
) -> Option<DetectionMethod> {
    let detection = &config.detection;

    if let Some(value) = fm.and_then(|f| f.str_field(TYPE_FIELD)) {
        if value.eq_ignore_ascii_case(&detection.field_value) {
            return Some(DetectionMethod::FrontmatterField);
        }
    }

    let doc_tags = tags::document_tags(fm, text);
    if doc_tags.contains(&detection.tag.to_lowercase()) {
        return Some(DetectionMethod::Tag);
    }

    let path_str = path.to_string_lossy().to_lowercase();
    let excluded = detection
        .exclude_folders
        .iter()
        .any(|f| path_str.contains(&f.to_lowercase()));
    if !excluded
        && detection
            .include_folders
            .iter()
            .any(|f| path_str.contains(&f.to_lowercase()))
    {
        return Some(DetectionMethod::FolderPath);
    }

    None
}

/// Living-hub settings read from the `hub:` frontmatter block.
///
/// Partial or malformed settings are silently defaulted, never errors:
/// a missing/invalid frequency is manual, non-string tag entries are
/// dropped, tags are lowercased and deduplicated.
#[derive(Debug, Clone, Default)]
struct LivingConfig {
    auto_gather_seeds: bool,
    seed_tags: BTreeSet<String>,
    update_frequency: UpdateFrequency,
}

fn living_config(fm: Option<&Frontmatter>) -> LivingConfig {
    let Some(block) = fm.and_then(|f| f.mapping(HUB_NAMESPACE)) else {
        return LivingConfig::default();
    };

    let auto_gather_seeds = block
        .get("auto_gather_seeds")
        .and_then(serde_yaml::Value::as_bool)
        .unwrap_or(false);

    let seed_tags: BTreeSet<String> = match block.get("seed_tags") {
        Some(serde_yaml::Value::Sequence(seq)) => seq
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim_start_matches('#').to_lowercase())
            .collect(),
        _ => BTreeSet::new(),
    };

    let update_frequency = block
        .get("update_frequency")
        .and_then(serde_yaml::Value::as_str)
        .map(UpdateFrequency::parse)
        .unwrap_or_default();

    LivingConfig { auto_gather_seeds, seed_tags, update_frequency }
}

/// Parse a document into a [`HubDocument`], or `None` when it is not a hub.
///
/// Combines heading parsing, link normalization, and region location over
/// the full raw text, plus the living configuration from frontmatter.
pub fn parse_hub(path: &Path, text: &str, config: &EngineConfig) -> Option<HubDocument> {
    let fm = frontmatter::parse(text);
    let method = classify(path, text, fm.as_ref(), config)?;
    tracing::debug!(path = %path.display(), method = method.as_str(), "classified hub");

    let headings = parse_headings(text);
    let total_lines = text.split('\n').count();
    let heading_map = build_heading_map(&headings, total_lines);
    let region = locate_region(text, &config.markers);
    let occurrences = scan_occurrences(text);
    let links = resolve_links(text, &occurrences, &heading_map, region);

    let living = living_config(fm.as_ref());
    let is_living = living.auto_gather_seeds && !living.seed_tags.is_empty();

    Some(HubDocument {
        path: path.to_path_buf(),
        title: title_for(path, fm.as_ref(), &headings),
        links,
        headings,
        detection_method: method,
        is_living,
        seed_tags: living.seed_tags,
        update_frequency: living.update_frequency,
        region,
    })
}

/// Title fallback chain: frontmatter `title:`, first heading, file stem.
fn title_for(
    path: &Path,
    fm: Option<&Frontmatter>,
    headings: &[crate::hub::Heading],
) -> String {
    if let Some(title) = fm.and_then(|f| f.str_field("title")) {
        return title.to_string();
    }
    if let Some(first) = headings.first() {
        return first.text.clone();
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .to_string()
}
