//! Auto-update engine: patching, history, and scheduling.
//!
//! Data flows one way: parsed hub -> matched seeds -> patched region ->
//! history record; undo reverses the most recent record.

pub mod history;
pub mod patch;
pub mod scheduler;
pub mod types;

pub use history::{HistoryLedger, HISTORY_CAPACITY};
pub use patch::apply_patch;
pub use scheduler::UpdateScheduler;
pub use types::{
    BatchError, BatchResult, PatchMode, PatchRecord, UpdateError, UpdateOptions,
};

/// Sink for user-facing update notifications.
///
/// The scheduler emits one line per applied patch when the caller asks for
/// it; the change watcher always suppresses notifications.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Default notifier: routes messages through the tracing pipeline.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::info!("{message}");
    }
}
