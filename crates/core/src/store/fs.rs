//! Filesystem-backed content store.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use walkdir::WalkDir;

use super::{ContentStore, StoreError};

/// Content store rooted at a vault directory on disk.
///
/// Paths handed to the trait methods are relative to the vault root.
/// Enumeration skips hidden directories and non-markdown files.
#[derive(Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let root = root
            .canonicalize()
            .map_err(|_| StoreError::MissingRoot(root.display().to_string()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    // depth 0 is the vault root itself, which may legitimately be hidden
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

impl ContentStore for FsStore {
    fn read(&self, path: &Path) -> Result<String, StoreError> {
        let abs = self.absolute(path);
        fs::read_to_string(&abs).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(path.display().to_string())
            } else {
                StoreError::Read { path: path.display().to_string(), source }
            }
        })
    }

    fn write(&self, path: &Path, text: &str) -> Result<(), StoreError> {
        let abs = self.absolute(path);
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: path.display().to_string(),
                source,
            })?;
        }
        fs::write(&abs, text).map_err(|source| StoreError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    fn modified(&self, path: &Path) -> Result<DateTime<Utc>, StoreError> {
        let abs = self.absolute(path);
        let meta = fs::metadata(&abs).map_err(|source| StoreError::Metadata {
            path: path.display().to_string(),
            source,
        })?;
        let modified = meta.modified().map_err(|source| StoreError::Metadata {
            path: path.display().to_string(),
            source,
        })?;
        Ok(modified.into())
    }

    fn list(&self) -> Result<Vec<PathBuf>, StoreError> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
        {
            let entry = entry
                .map_err(|e| StoreError::Walk(self.root.display().to_string(), e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_md = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("md"))
                .unwrap_or(false);
            if !is_md {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path())
                .to_path_buf();
            paths.push(rel);
        }
        paths.sort();
        Ok(paths)
    }
}
