//! Region patching: merging matched seeds into the managed region.

use std::path::{Path, PathBuf};

use crate::config::MarkerConfig;
use crate::hub::locate_region;
use crate::seeds::SeedNote;
use crate::store::ContentStore;

use super::types::UpdateError;

/// Tags never echoed into generated link lines.
const BOILERPLATE_TAGS: &[&str] = &["seed", "hub", "moc"];

/// Longest excerpt carried into a link line before truncation.
const EXCERPT_MAX_CHARS: usize = 60;

/// Result of one applied patch.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub added_paths: Vec<PathBuf>,
    /// Verbatim region text before the patch, for undo.
    pub previous_region_text: String,
}

/// Merge `seeds` into the managed region of the document at `hub_path`.
///
/// The region is re-located on the text read here, never on offsets from
/// parse time, so a document edited since the last parse still patches at
/// the right place. Existing list-item lines in the region are preserved
/// verbatim below the new entries; other region lines are dropped. The
/// rebuilt document is written back in a single replace.
pub fn apply_patch(
    store: &dyn ContentStore,
    markers: &MarkerConfig,
    hub_path: &Path,
    seeds: &[SeedNote],
) -> Result<PatchOutcome, UpdateError> {
    let text = store.read(hub_path)?;
    let region = locate_region(&text, markers)
        .ok_or_else(|| UpdateError::MissingRegion(hub_path.to_path_buf()))?;

    let previous_region_text = text[region.start..region.end].to_string();

    let mut lines: Vec<String> = seeds.iter().map(format_seed_line).collect();
    lines.extend(
        previous_region_text
            .split('\n')
            .filter(|l| is_list_item(l))
            .map(str::to_string),
    );

    let prefix = &text[..region.start];
    let suffix = &text[region.end..];
    let updated = if lines.is_empty() {
        format!("{prefix}{suffix}")
    } else {
        format!("{prefix}\n{}\n{suffix}", lines.join("\n"))
    };

    store.write(hub_path, &updated)?;
    tracing::debug!(
        path = %hub_path.display(),
        added = seeds.len(),
        "patched managed region"
    );

    Ok(PatchOutcome {
        added_paths: seeds.iter().map(|s| s.path.clone()).collect(),
        previous_region_text,
    })
}

/// A line that already carries gathered or hand-placed content.
fn is_list_item(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("- ") || trimmed.starts_with("* ") || trimmed.starts_with("+ ")
}

/// One generated link line: `- [[title]] - "excerpt" #tag ...`.
fn format_seed_line(seed: &SeedNote) -> String {
    let excerpt = truncate_excerpt(&seed.excerpt);
    let mut line = format!("- [[{}]] - \"{}\"", seed.title, excerpt);
    let tags: Vec<String> = seed
        .tags
        .iter()
        .filter(|t| !BOILERPLATE_TAGS.contains(&t.as_str()))
        .map(|t| format!("#{t}"))
        .collect();
    if !tags.is_empty() {
        line.push(' ');
        line.push_str(&tags.join(" "));
    }
    line
}

fn truncate_excerpt(excerpt: &str) -> String {
    if excerpt.chars().count() <= EXCERPT_MAX_CHARS {
        return excerpt.to_string();
    }
    let cut: String = excerpt.chars().take(EXCERPT_MAX_CHARS).collect();
    format!("{cut}...")
}
