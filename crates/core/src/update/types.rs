//! Update engine data types and errors.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum UpdateError {
    /// A living hub without region markers cannot be patched or undone.
    #[error("no managed region in {}", .0.display())]
    MissingRegion(PathBuf),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How a patch came to be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatchMode {
    /// Scheduled or watcher-driven update.
    Auto,
    /// Explicitly triggered by the user.
    Manual,
    /// Prospective record only; nothing was written.
    DryRun,
}

/// Record of one applied patch, held by the history ledger for undo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchRecord {
    pub hub_path: PathBuf,
    pub added_seed_paths: Vec<PathBuf>,
    pub timestamp: DateTime<Utc>,
    /// Verbatim text of the managed region before the patch.
    pub previous_region_text: String,
    pub mode: PatchMode,
}

/// Options for a single update run.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Bypass the frequency gate.
    pub force: bool,
    /// Compute the prospective record without writing.
    pub dry_run: bool,
    /// An explicit user trigger; required for manual-frequency hubs.
    pub manual_trigger: bool,
    /// Emit a user notification on success.
    pub notify: bool,
}

/// A per-document failure inside a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchError {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a batch update across all hub documents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResult {
    pub updated_count: usize,
    pub seeds_added_count: usize,
    pub records: Vec<PatchRecord>,
    pub errors: Vec<BatchError>,
}

impl BatchResult {
    /// A batch succeeds exactly when no document failed.
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }
}
