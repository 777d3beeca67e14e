//! In-memory content store, the unit-test double.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};

use super::{ContentStore, StoreError};

#[derive(Debug, Clone)]
struct Doc {
    text: String,
    modified: DateTime<Utc>,
}

/// Content store backed by a map.
///
/// Writes bump the modification time by one second per write so cache
/// invalidation behaves like a real store; tests that need exact
/// timestamps use [`MemStore::insert`].
#[derive(Debug)]
pub struct MemStore {
    docs: RefCell<BTreeMap<PathBuf, Doc>>,
    write_seq: RefCell<i64>,
}

impl MemStore {
    pub fn new() -> Self {
        Self { docs: RefCell::new(BTreeMap::new()), write_seq: RefCell::new(0) }
    }

    /// Insert or replace a document with an explicit modification time.
    pub fn insert(&self, path: impl Into<PathBuf>, text: &str, modified: DateTime<Utc>) {
        self.docs
            .borrow_mut()
            .insert(path.into(), Doc { text: text.to_string(), modified });
    }

    fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for MemStore {
    fn read(&self, path: &Path) -> Result<String, StoreError> {
        self.docs
            .borrow()
            .get(path)
            .map(|d| d.text.clone())
            .ok_or_else(|| StoreError::NotFound(path.display().to_string()))
    }

    fn write(&self, path: &Path, text: &str) -> Result<(), StoreError> {
        let mut seq = self.write_seq.borrow_mut();
        *seq += 1;
        let modified = Self::epoch() + Duration::seconds(*seq);
        self.docs
            .borrow_mut()
            .insert(path.to_path_buf(), Doc { text: text.to_string(), modified });
        Ok(())
    }

    fn modified(&self, path: &Path) -> Result<DateTime<Utc>, StoreError> {
        self.docs
            .borrow()
            .get(path)
            .map(|d| d.modified)
            .ok_or_else(|| StoreError::NotFound(path.display().to_string()))
    }

    fn list(&self) -> Result<Vec<PathBuf>, StoreError> {
        Ok(self.docs.borrow().keys().cloned().collect())
    }
}
