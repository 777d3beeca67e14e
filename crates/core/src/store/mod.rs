//! Content store abstraction.
//!
//! The engine never touches the filesystem directly; it goes through a
//! [`ContentStore`] so the vault backend stays swappable and tests can run
//! against an in-memory store.

pub mod fs;
pub mod memory;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use fs::FsStore;
pub use memory::MemStore;

/// Errors from content store operations. Every variant carries the
/// offending path so batch callers can report per-document failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("vault root does not exist: {0}")]
    MissingRoot(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read metadata for {path}: {source}")]
    Metadata {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk vault directory {0}: {1}")]
    Walk(String, #[source] walkdir::Error),
}

/// Read/write access to the note corpus.
///
/// All methods take `&self`; implementations use interior mutability where
/// needed. The execution model is single-threaded (no two operations on the
/// same path are ever in flight concurrently), so no locking is involved.
pub trait ContentStore {
    /// Read a document's full text.
    fn read(&self, path: &Path) -> Result<String, StoreError>;

    /// Replace a document's full text in one atomic write.
    fn write(&self, path: &Path, text: &str) -> Result<(), StoreError>;

    /// Last modification time of a document.
    fn modified(&self, path: &Path) -> Result<DateTime<Utc>, StoreError>;

    /// All markdown documents in the store, as store-relative paths.
    fn list(&self) -> Result<Vec<PathBuf>, StoreError>;
}
