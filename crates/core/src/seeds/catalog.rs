//! Seed catalog: a full-scan snapshot of the corpus.
//!
//! The catalog is rebuilt per update run, so every query sees an immutable
//! snapshot. Per-file failures are logged and skipped; a broken note never
//! aborts a scan.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};

use crate::frontmatter::{self, Frontmatter};
use crate::store::{ContentStore, StoreError};
use crate::tags;

use super::types::SeedNote;

/// In-memory seed index, queried by tag.
#[derive(Debug, Default)]
pub struct SeedCatalog {
    seeds: Vec<SeedNote>,
}

impl SeedCatalog {
    /// Scan every markdown document in the store into a snapshot.
    pub fn scan(store: &dyn ContentStore) -> Result<Self, StoreError> {
        let mut seeds = Vec::new();
        for path in store.list()? {
            match snapshot(store, &path) {
                Ok(seed) => seeds.push(seed),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "skipping unreadable note: {e}");
                }
            }
        }
        Ok(Self { seeds })
    }

    #[cfg(test)]
    pub(crate) fn from_seeds(seeds: Vec<SeedNote>) -> Self {
        Self { seeds }
    }

    /// Seeds whose tag set intersects `wanted` (case-insensitive; the
    /// caller's tags are expected lowercased, snapshot tags already are).
    pub fn query(&self, wanted: &BTreeSet<String>) -> Vec<SeedNote> {
        self.seeds
            .iter()
            .filter(|seed| {
                seed.tags
                    .iter()
                    .any(|t| wanted.iter().any(|w| w.eq_ignore_ascii_case(t)))
            })
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }
}

fn snapshot(store: &dyn ContentStore, path: &Path) -> Result<SeedNote, StoreError> {
    let text = store.read(path)?;
    let modified = store.modified(path)?;
    let fm = frontmatter::parse(&text);
    let body = body_after_frontmatter(&text);

    Ok(SeedNote {
        path: path.to_path_buf(),
        title: title_for(path, fm.as_ref(), body),
        tags: tags::document_tags(fm.as_ref(), &text),
        created_at: created_at(fm.as_ref()).unwrap_or(modified),
        excerpt: excerpt(body),
    })
}

/// Skip the leading frontmatter block, if any.
fn body_after_frontmatter(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("---") else {
        return text;
    };
    let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
        return text;
    };
    let mut pos = 0;
    for line in rest.split('\n') {
        if line.trim_end_matches('\r').trim() == "---" {
            let after = &rest[pos + line.len()..];
            return after.strip_prefix('\n').unwrap_or(after);
        }
        pos += line.len() + 1;
    }
    text
}

fn title_for(path: &Path, fm: Option<&Frontmatter>, body: &str) -> String {
    if let Some(title) = fm.and_then(|f| f.str_field("title")) {
        return title.to_string();
    }
    for line in body.lines() {
        let trimmed = line.trim();
        if let Some(heading) = trimmed.strip_prefix('#') {
            let heading = heading.trim_start_matches('#').trim();
            if !heading.is_empty() {
                return heading.to_string();
            }
        }
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .to_string()
}

/// Parse the frontmatter `created:` field as RFC 3339 or a bare date.
fn created_at(fm: Option<&Frontmatter>) -> Option<DateTime<Utc>> {
    let raw = fm?.str_field("created")?;
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}

/// First non-blank, non-heading body line, with inline `#tag` tokens
/// removed. Tags are rendered separately on generated link lines and must
/// not leak into the quoted excerpt.
fn excerpt(body: &str) -> String {
    let line = body
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty() && !l.starts_with('#'))
        .unwrap_or_default();
    line.split_whitespace()
        .filter(|tok| !is_tag_token(tok))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A standalone inline tag token, per the same shape the tag scanner
/// matches. Mid-word hashes ("c#4") are not tags.
fn is_tag_token(token: &str) -> bool {
    token
        .strip_prefix('#')
        .and_then(|rest| rest.chars().next())
        .map_or(false, |c| c.is_ascii_alphabetic())
}
