//! Debounced reaction to content-store change events.
//!
//! The watcher keeps one deadline per path; every event for a path resets
//! its deadline (clearing-before-rescheduling is the only cancellation
//! mechanism). When a deadline passes, every living hub configured for
//! immediate updates is refreshed with notifications suppressed.
//!
//! Event delivery is abstracted behind [`ChangeSource`], a plain
//! subscribe/drain interface with no dependency on any particular event
//! loop: the host pumps events in and ticks deadlines from wherever its
//! scheduling happens.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};

use crate::store::ContentStore;
use crate::tags;
use crate::update::UpdateScheduler;

/// Default quiet period before reacting to a burst of events.
pub const DEFAULT_DEBOUNCE_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
}

/// One create/modify notification from the content store.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

/// Opaque handle for a change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Where change notifications come from.
pub trait ChangeSource {
    fn subscribe(&mut self) -> SubscriberId;
    fn unsubscribe(&mut self, id: SubscriberId);
    /// Events queued for a subscriber since the last drain.
    fn drain(&mut self, id: SubscriberId) -> Vec<ChangeEvent>;
}

/// In-memory change bus; the test (and embedding) event source.
#[derive(Debug, Default)]
pub struct MemoryChangeSource {
    queues: HashMap<SubscriberId, Vec<ChangeEvent>>,
    next_id: u64,
}

impl MemoryChangeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an event to every subscriber.
    pub fn publish(&mut self, event: ChangeEvent) {
        for queue in self.queues.values_mut() {
            queue.push(event.clone());
        }
    }
}

impl ChangeSource for MemoryChangeSource {
    fn subscribe(&mut self) -> SubscriberId {
        self.next_id += 1;
        let id = SubscriberId(self.next_id);
        self.queues.insert(id, Vec::new());
        id
    }

    fn unsubscribe(&mut self, id: SubscriberId) {
        self.queues.remove(&id);
    }

    fn drain(&mut self, id: SubscriberId) -> Vec<ChangeEvent> {
        self.queues.get_mut(&id).map(std::mem::take).unwrap_or_default()
    }
}

/// Debounced change watcher driving immediate-mode updates.
pub struct ChangeWatcher {
    subscription: Option<SubscriberId>,
    deadlines: HashMap<PathBuf, DateTime<Utc>>,
    debounce: Duration,
    /// Cheap pre-filter: react only to documents carrying one of these.
    seed_tags: Vec<String>,
}

impl ChangeWatcher {
    pub fn new(debounce_ms: u64, seed_tags: Vec<String>) -> Self {
        Self {
            subscription: None,
            deadlines: HashMap::new(),
            debounce: Duration::milliseconds(debounce_ms as i64),
            seed_tags,
        }
    }

    pub fn attach(&mut self, source: &mut dyn ChangeSource) {
        self.subscription = Some(source.subscribe());
    }

    /// Ingest pending events: tag-check each changed document (no full
    /// parse) and reset its debounce deadline.
    pub fn pump(
        &mut self,
        source: &mut dyn ChangeSource,
        store: &dyn ContentStore,
        now: DateTime<Utc>,
    ) {
        let Some(id) = self.subscription else {
            return;
        };
        for event in source.drain(id) {
            let Ok(text) = store.read(&event.path) else {
                continue;
            };
            if !tags::has_any_tag(&text, &self.seed_tags) {
                continue;
            }
            tracing::debug!(path = %event.path.display(), "debouncing change event");
            self.deadlines.insert(event.path, now + self.debounce);
        }
    }

    /// Fire every deadline at or before `now`. Any expired timer triggers
    /// one immediate-mode sweep; per-document failures are already
    /// isolated inside the scheduler.
    pub fn fire_due(
        &mut self,
        scheduler: &mut UpdateScheduler,
        now: DateTime<Utc>,
    ) -> usize {
        let due: Vec<PathBuf> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(path, _)| path.clone())
            .collect();
        for path in &due {
            self.deadlines.remove(path);
        }
        if due.is_empty() {
            return 0;
        }

        tracing::debug!(settled = due.len(), "change events settled, updating immediate hubs");
        match scheduler.update_immediate() {
            Ok(result) => result.updated_count,
            Err(e) => {
                tracing::warn!("immediate update sweep failed: {e}");
                0
            }
        }
    }

    /// Number of paths currently waiting out their quiet period.
    pub fn pending(&self) -> usize {
        self.deadlines.len()
    }

    /// Cancel all timers and drop the subscription.
    pub fn dispose(&mut self, source: &mut dyn ChangeSource) {
        self.deadlines.clear();
        if let Some(id) = self.subscription.take() {
            source.unsubscribe(id);
        }
    }
}
