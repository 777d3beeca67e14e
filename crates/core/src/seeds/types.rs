//! Seed note data types.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An immutable snapshot of a seed note, taken at catalog scan time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedNote {
    /// Store-relative path.
    pub path: PathBuf,
    /// Title: frontmatter `title:`, else first heading, else file stem.
    pub title: String,
    /// Lowercased tags from frontmatter and inline `#tag` tokens.
    pub tags: BTreeSet<String>,
    /// Creation time: frontmatter `created:` when parseable, else the
    /// store modification time.
    pub created_at: DateTime<Utc>,
    /// First non-blank, non-heading body line.
    pub excerpt: String,
}

impl SeedNote {
    /// Path without the markdown extension, for link-target comparison.
    pub fn path_sans_ext(&self) -> String {
        self.path.with_extension("").to_string_lossy().into_owned()
    }

    /// File stem, for basename-style link-target comparison.
    pub fn basename(&self) -> String {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string()
    }
}
