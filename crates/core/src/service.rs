//! Public façade over the engine.
//!
//! `HubService` wires a content store to the update scheduler and exposes
//! the operations the outer layers call: detect, parse, update, undo,
//! history, and cache control.

use std::path::Path;
use std::rc::Rc;

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::hub::HubDocument;
use crate::store::{ContentStore, FsStore, StoreError};
use crate::update::{BatchResult, PatchRecord, UpdateError, UpdateOptions, UpdateScheduler};

pub struct HubService {
    scheduler: UpdateScheduler,
}

impl HubService {
    /// Open a service over a vault directory on disk.
    pub fn open(vault_root: &Path, config: EngineConfig) -> Result<Self, StoreError> {
        let store: Rc<dyn ContentStore> = Rc::new(FsStore::open(vault_root)?);
        Ok(Self::with_store(store, config, Box::new(SystemClock)))
    }

    /// Build a service over any store and clock.
    pub fn with_store(
        store: Rc<dyn ContentStore>,
        config: EngineConfig,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self { scheduler: UpdateScheduler::new(store, config, clock) }
    }

    /// All detected hub documents.
    pub fn detect(&mut self) -> Result<Vec<HubDocument>, UpdateError> {
        self.scheduler.detect()
    }

    /// Parse one document; `None` when it is not a hub.
    pub fn parse(&mut self, path: &Path) -> Result<Option<HubDocument>, UpdateError> {
        self.scheduler.parse(path)
    }

    /// Update one hub; `None` when nothing needed doing.
    pub fn update_one(
        &mut self,
        path: &Path,
        options: UpdateOptions,
    ) -> Result<Option<PatchRecord>, UpdateError> {
        self.scheduler.update_one(path, options)
    }

    /// Update every living hub.
    pub fn update_all(&mut self, options: UpdateOptions) -> Result<BatchResult, UpdateError> {
        self.scheduler.update_all(options)
    }

    /// Undo the most recent patch; false when there is no history.
    pub fn undo(&mut self, path: &Path) -> Result<bool, UpdateError> {
        self.scheduler.undo(path)
    }

    /// Patch history for one path, or all paths newest first.
    pub fn history(&self, path: Option<&Path>, limit: Option<usize>) -> Vec<PatchRecord> {
        self.scheduler.history(path, limit)
    }

    /// Drop parse cache entries.
    pub fn clear_cache(&mut self, path: Option<&Path>) {
        self.scheduler.clear_cache(path)
    }

    /// Every history record, for hosts that persist the ledger.
    pub fn export_history(&self) -> Vec<PatchRecord> {
        self.scheduler.export_history()
    }

    /// Replace the ledger with previously exported records.
    pub fn import_history(&mut self, records: Vec<PatchRecord>) {
        self.scheduler.import_history(records)
    }

    /// The underlying scheduler, for watcher integration.
    pub fn scheduler_mut(&mut self) -> &mut UpdateScheduler {
        &mut self.scheduler
    }
}
