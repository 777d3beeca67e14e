//! Update orchestration: frequency gating, batch runs, and undo.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::hub::{locate_region, parse_hub, HubDocument, ParseCache, UpdateFrequency};
use crate::seeds::{find_matching_seeds, SeedCatalog};
use crate::store::ContentStore;

use super::history::HistoryLedger;
use super::patch::apply_patch;
use super::types::{BatchError, BatchResult, PatchMode, PatchRecord, UpdateError, UpdateOptions};
use super::{LogNotifier, Notifier};

/// Drives hub updates over a content store.
///
/// All operations are strictly sequential: a document is fully read,
/// patched, and written before the next one is considered. Batch runs
/// never abort on a single document's failure.
pub struct UpdateScheduler {
    store: Rc<dyn ContentStore>,
    config: EngineConfig,
    cache: ParseCache,
    ledger: HistoryLedger,
    last_update: HashMap<PathBuf, DateTime<Utc>>,
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
}

impl UpdateScheduler {
    pub fn new(store: Rc<dyn ContentStore>, config: EngineConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            config,
            cache: ParseCache::new(),
            ledger: HistoryLedger::new(),
            last_update: HashMap::new(),
            clock,
            notifier: Box::new(LogNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parse a document through the cache.
    ///
    /// `None` means "not a hub document"; that result is memoized too.
    pub fn parse(&mut self, path: &Path) -> Result<Option<HubDocument>, UpdateError> {
        let modified = self.store.modified(path)?;
        let now = self.clock.now();
        if let Some(hit) = self.cache.lookup(path, now, modified) {
            return Ok(hit);
        }
        let text = self.store.read(path)?;
        let doc = parse_hub(path, &text, &self.config);
        self.cache.store(path, doc.clone(), now, modified);
        Ok(doc)
    }

    /// All hub documents in the store. Unreadable documents are skipped
    /// with a warning, never fatal.
    pub fn detect(&mut self) -> Result<Vec<HubDocument>, UpdateError> {
        let mut hubs = Vec::new();
        for path in self.store.list()? {
            match self.parse(&path) {
                Ok(Some(hub)) => hubs.push(hub),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), "skipping during detect: {e}");
                }
            }
        }
        Ok(hubs)
    }

    /// Update a single hub document.
    ///
    /// Returns `Ok(None)` when nothing was done: not a hub, not living,
    /// gated by frequency, or no new seeds matched.
    pub fn update_one(
        &mut self,
        path: &Path,
        options: UpdateOptions,
    ) -> Result<Option<PatchRecord>, UpdateError> {
        let catalog = SeedCatalog::scan(self.store.as_ref())?;
        self.update_with_catalog(path, options, &catalog)
    }

    fn update_with_catalog(
        &mut self,
        path: &Path,
        options: UpdateOptions,
        catalog: &SeedCatalog,
    ) -> Result<Option<PatchRecord>, UpdateError> {
        let Some(hub) = self.parse(path)? else {
            return Ok(None);
        };
        if !hub.is_living {
            return Ok(None);
        }

        let last = self.last_update.get(path).copied();
        if !options.force && !self.frequency_allows(hub.update_frequency, last, options) {
            tracing::debug!(
                path = %path.display(),
                frequency = hub.update_frequency.as_str(),
                "update gated by frequency policy"
            );
            return Ok(None);
        }

        // The last-update timestamp is the incremental floor; a hub never
        // updated considers every matching seed.
        let seeds = find_matching_seeds(&hub, catalog, last);
        if seeds.is_empty() {
            return Ok(None);
        }

        let now = self.clock.now();

        if options.dry_run {
            let text = self.store.read(path)?;
            let region = locate_region(&text, &self.config.markers)
                .ok_or_else(|| UpdateError::MissingRegion(path.to_path_buf()))?;
            return Ok(Some(PatchRecord {
                hub_path: path.to_path_buf(),
                added_seed_paths: seeds.iter().map(|s| s.path.clone()).collect(),
                timestamp: now,
                previous_region_text: text[region.start..region.end].to_string(),
                mode: PatchMode::DryRun,
            }));
        }

        let outcome = apply_patch(self.store.as_ref(), &self.config.markers, path, &seeds)?;
        let record = PatchRecord {
            hub_path: path.to_path_buf(),
            added_seed_paths: outcome.added_paths,
            timestamp: now,
            previous_region_text: outcome.previous_region_text,
            mode: if options.manual_trigger { PatchMode::Manual } else { PatchMode::Auto },
        };

        self.ledger.push(record.clone());
        self.last_update.insert(path.to_path_buf(), record.timestamp);
        tracing::info!(
            path = %path.display(),
            seeds = record.added_seed_paths.len(),
            "hub updated"
        );
        if options.notify {
            self.notifier.notify(&format!(
                "{}: gathered {} new seed note(s)",
                path.display(),
                record.added_seed_paths.len()
            ));
        }
        Ok(Some(record))
    }

    fn frequency_allows(
        &self,
        frequency: UpdateFrequency,
        last: Option<DateTime<Utc>>,
        options: UpdateOptions,
    ) -> bool {
        match frequency {
            UpdateFrequency::Immediate => true,
            // No prior timestamp counts as "never updated" and proceeds.
            UpdateFrequency::Daily => match last {
                None => true,
                Some(at) => at.date_naive() != self.clock.now().date_naive(),
            },
            UpdateFrequency::Manual => options.manual_trigger,
        }
    }

    /// Update every living hub document, strictly sequentially.
    ///
    /// One document's failure is recorded and the loop continues.
    pub fn update_all(&mut self, options: UpdateOptions) -> Result<BatchResult, UpdateError> {
        self.run_batch(options, false)
    }

    /// Watcher entry point: update only immediate-frequency hubs, with
    /// notifications suppressed.
    pub fn update_immediate(&mut self) -> Result<BatchResult, UpdateError> {
        self.run_batch(UpdateOptions::default(), true)
    }

    fn run_batch(
        &mut self,
        options: UpdateOptions,
        only_immediate: bool,
    ) -> Result<BatchResult, UpdateError> {
        let catalog = SeedCatalog::scan(self.store.as_ref())?;
        let mut result = BatchResult::default();

        for path in self.store.list()? {
            if only_immediate {
                match self.parse(&path) {
                    Ok(Some(hub))
                        if hub.is_living
                            && hub.update_frequency == UpdateFrequency::Immediate => {}
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), "batch parse failed: {e}");
                        result.errors.push(BatchError {
                            path: path.clone(),
                            message: e.to_string(),
                        });
                        continue;
                    }
                }
            }
            match self.update_with_catalog(&path, options, &catalog) {
                Ok(Some(record)) => {
                    result.updated_count += 1;
                    result.seeds_added_count += record.added_seed_paths.len();
                    result.records.push(record);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), "batch update failed: {e}");
                    result.errors.push(BatchError { path: path.clone(), message: e.to_string() });
                }
            }
        }
        Ok(result)
    }

    /// Undo the most recent patch on a hub document.
    ///
    /// The current region is re-located (the document may have moved since
    /// record time) and the saved region text spliced back. Returns false
    /// when there is no history for the path.
    pub fn undo(&mut self, path: &Path) -> Result<bool, UpdateError> {
        let Some(record) = self.ledger.front(path).cloned() else {
            return Ok(false);
        };

        let text = self.store.read(path)?;
        let region = locate_region(&text, &self.config.markers)
            .ok_or_else(|| UpdateError::MissingRegion(path.to_path_buf()))?;

        let restored = format!(
            "{}{}{}",
            &text[..region.start],
            record.previous_region_text,
            &text[region.end..]
        );
        self.store.write(path, &restored)?;

        self.ledger.pop_front(path);
        match self.ledger.front(path) {
            Some(prev) => {
                self.last_update.insert(path.to_path_buf(), prev.timestamp);
            }
            None => {
                self.last_update.remove(path);
            }
        }
        tracing::info!(path = %path.display(), "undid last hub update");
        Ok(true)
    }

    /// Patch history, for one path or across all hubs.
    pub fn history(&self, path: Option<&Path>, limit: Option<usize>) -> Vec<PatchRecord> {
        self.ledger.list(path, limit)
    }

    /// Every history record, for hosts that persist the ledger between
    /// runs.
    pub fn export_history(&self) -> Vec<PatchRecord> {
        self.ledger.snapshot()
    }

    /// Replace the ledger with previously exported records. Incremental
    /// floors are rebuilt from each path's newest record.
    pub fn import_history(&mut self, records: Vec<PatchRecord>) {
        self.last_update.clear();
        for record in &records {
            let entry = self
                .last_update
                .entry(record.hub_path.clone())
                .or_insert(record.timestamp);
            if record.timestamp > *entry {
                *entry = record.timestamp;
            }
        }
        self.ledger = HistoryLedger::restore(records);
    }

    /// Drop parse cache entries, for one path or wholesale.
    pub fn clear_cache(&mut self, path: Option<&Path>) {
        match path {
            Some(p) => self.cache.clear_path(p),
            None => self.cache.clear(),
        }
    }
}
