//! Bounded per-hub undo log.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::types::PatchRecord;

/// Most recent records kept per hub path; oldest evicted first.
pub const HISTORY_CAPACITY: usize = 10;

/// Patch records keyed by hub path, newest first.
///
/// The ledger exclusively owns its records; callers get clones. Undo
/// itself lives in the scheduler because splicing the region back needs
/// store access; the ledger only does the bookkeeping.
#[derive(Debug, Default)]
pub struct HistoryLedger {
    records: HashMap<PathBuf, Vec<PatchRecord>>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a record and trim to capacity.
    pub fn push(&mut self, record: PatchRecord) {
        let list = self.records.entry(record.hub_path.clone()).or_default();
        list.insert(0, record);
        list.truncate(HISTORY_CAPACITY);
    }

    /// Most recent record for a path.
    pub fn front(&self, path: &Path) -> Option<&PatchRecord> {
        self.records.get(path).and_then(|list| list.first())
    }

    /// Remove and return the most recent record for a path.
    pub fn pop_front(&mut self, path: &Path) -> Option<PatchRecord> {
        let list = self.records.get_mut(path)?;
        if list.is_empty() {
            return None;
        }
        let record = list.remove(0);
        if list.is_empty() {
            self.records.remove(path);
        }
        Some(record)
    }

    /// Records for one path, or across all paths sorted newest first.
    pub fn list(&self, path: Option<&Path>, limit: Option<usize>) -> Vec<PatchRecord> {
        let mut out: Vec<PatchRecord> = match path {
            Some(p) => self.records.get(p).cloned().unwrap_or_default(),
            None => {
                let mut all: Vec<PatchRecord> =
                    self.records.values().flatten().cloned().collect();
                all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                all
            }
        };
        if let Some(limit) = limit {
            out.truncate(limit);
        }
        out
    }

    pub fn len(&self, path: &Path) -> usize {
        self.records.get(path).map_or(0, Vec::len)
    }

    /// Rebuild the ledger from a flat record list in any order. Each
    /// path keeps its newest records up to capacity.
    pub fn restore(records: Vec<PatchRecord>) -> Self {
        let mut sorted = records;
        sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        let mut ledger = Self::new();
        for record in sorted {
            ledger.push(record);
        }
        ledger
    }

    /// Every record across all paths, newest first. Inverse of
    /// [`HistoryLedger::restore`].
    pub fn snapshot(&self) -> Vec<PatchRecord> {
        self.list(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::types::PatchMode;
    use chrono::{TimeZone, Utc};

    fn record(path: &str, secs: i64) -> PatchRecord {
        PatchRecord {
            hub_path: PathBuf::from(path),
            added_seed_paths: vec![],
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            previous_region_text: format!("region@{secs}"),
            mode: PatchMode::Auto,
        }
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut ledger = HistoryLedger::new();
        for i in 0..15 {
            ledger.push(record("hub.md", i));
        }
        assert_eq!(ledger.len(Path::new("hub.md")), HISTORY_CAPACITY);
        // newest kept at the front, record 5 is the oldest survivor
        let list = ledger.list(Some(Path::new("hub.md")), None);
        assert_eq!(list[0].previous_region_text, "region@14");
        assert_eq!(list[9].previous_region_text, "region@5");
    }

    #[test]
    fn pop_front_returns_newest_and_cleans_up() {
        let mut ledger = HistoryLedger::new();
        ledger.push(record("hub.md", 1));
        ledger.push(record("hub.md", 2));

        let popped = ledger.pop_front(Path::new("hub.md")).unwrap();
        assert_eq!(popped.previous_region_text, "region@2");
        assert_eq!(ledger.front(Path::new("hub.md")).unwrap().previous_region_text, "region@1");

        ledger.pop_front(Path::new("hub.md")).unwrap();
        assert!(ledger.pop_front(Path::new("hub.md")).is_none());
        assert_eq!(ledger.len(Path::new("hub.md")), 0);
    }

    #[test]
    fn list_across_paths_is_newest_first() {
        let mut ledger = HistoryLedger::new();
        ledger.push(record("a.md", 10));
        ledger.push(record("b.md", 20));
        ledger.push(record("a.md", 30));

        let all = ledger.list(None, None);
        let stamps: Vec<_> = all.iter().map(|r| r.timestamp.timestamp()).collect();
        assert_eq!(stamps, vec![30, 20, 10]);

        let limited = ledger.list(None, Some(2));
        assert_eq!(limited.len(), 2);
    }
}
