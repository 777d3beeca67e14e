//! Parse memoization keyed by document path.
//!
//! Entries are invalidated by a fixed TTL and by comparing the stored
//! source modification time against the live one. Correctness relies on
//! that comparison, not on locking: under the single-threaded execution
//! model no two parses of the same path are ever in flight concurrently.
//! The cache is never persisted across process restarts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};

use super::types::HubDocument;

/// Fixed entry time-to-live.
pub const CACHE_TTL_SECS: i64 = 5 * 60;

#[derive(Debug, Clone)]
struct CacheEntry {
    /// `None` records "parsed, not a hub" so non-hubs also hit the cache.
    document: Option<HubDocument>,
    cached_at: DateTime<Utc>,
    source_mod_time: DateTime<Utc>,
}

/// Memoized parse results.
#[derive(Debug, Default)]
pub struct ParseCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a still-valid entry. Returns the outer `None` on a miss;
    /// the inner option is the memoized classification result.
    pub fn lookup(
        &self,
        path: &Path,
        now: DateTime<Utc>,
        live_mod_time: DateTime<Utc>,
    ) -> Option<Option<HubDocument>> {
        let entry = self.entries.get(path)?;
        if now - entry.cached_at > Duration::seconds(CACHE_TTL_SECS) {
            tracing::debug!(path = %path.display(), "parse cache entry expired");
            return None;
        }
        if entry.source_mod_time != live_mod_time {
            tracing::debug!(path = %path.display(), "parse cache entry stale");
            return None;
        }
        Some(entry.document.clone())
    }

    /// Store or replace the parse result for a path.
    pub fn store(
        &mut self,
        path: &Path,
        document: Option<HubDocument>,
        now: DateTime<Utc>,
        source_mod_time: DateTime<Utc>,
    ) {
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry { document, cached_at: now, source_mod_time },
        );
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop the entry for one path.
    pub fn clear_path(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn hit_within_ttl_and_matching_mod_time() {
        let mut cache = ParseCache::new();
        cache.store(Path::new("a.md"), None, at(0), at(0));
        assert!(cache.lookup(Path::new("a.md"), at(10), at(0)).is_some());
    }

    #[test]
    fn miss_after_ttl() {
        let mut cache = ParseCache::new();
        cache.store(Path::new("a.md"), None, at(0), at(0));
        assert!(cache.lookup(Path::new("a.md"), at(CACHE_TTL_SECS + 1), at(0)).is_none());
    }

    #[test]
    fn miss_when_source_changed() {
        let mut cache = ParseCache::new();
        cache.store(Path::new("a.md"), None, at(0), at(0));
        assert!(cache.lookup(Path::new("a.md"), at(5), at(3)).is_none());
    }

    #[test]
    fn clear_drops_entries() {
        let mut cache = ParseCache::new();
        cache.store(Path::new("a.md"), None, at(0), at(0));
        cache.store(Path::new("b.md"), None, at(0), at(0));

        cache.clear_path(Path::new("a.md"));
        assert!(cache.lookup(Path::new("a.md"), at(1), at(0)).is_none());
        assert!(cache.lookup(Path::new("b.md"), at(1), at(0)).is_some());

        cache.clear();
        assert!(cache.is_empty());
    }
}
