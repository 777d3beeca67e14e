//! Command implementations.
//!
//! Every command follows the same shape: load configuration, open the
//! service over the vault, do the work, print, and exit non-zero on any
//! error.

pub mod clear_cache;
pub mod detect;
pub mod history;
pub mod parse;
pub mod undo;
pub mod update;
pub mod update_all;

use std::fs;
use std::path::{Path, PathBuf};

use mdhub_core::config::{ConfigLoader, EngineConfig};
use mdhub_core::update::PatchRecord;
use mdhub_core::HubService;

/// Load configuration and open the vault, exiting on failure. Any ledger
/// persisted by a previous invocation is loaded back in.
pub(crate) fn open_service(vault: &Path, config: Option<&Path>) -> HubService {
    let cfg = load_config(config);
    crate::logging::init(&cfg);

    let mut service = match HubService::open(vault, cfg) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error opening vault {}: {}", vault.display(), e);
            std::process::exit(1);
        }
    };
    service.import_history(load_history(vault));
    service
}

pub(crate) fn load_config(config: Option<&Path>) -> EngineConfig {
    match ConfigLoader::load(config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    }
}

fn history_file(vault: &Path) -> PathBuf {
    vault.join(".mdhub").join("history.json")
}

/// Records persisted by a previous run. A missing or unreadable file is
/// an empty history, never an error.
fn load_history(vault: &Path) -> Vec<PatchRecord> {
    let path = history_file(vault);
    let Ok(raw) = fs::read_to_string(&path) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring corrupt history file: {e}");
            Vec::new()
        }
    }
}

/// Persist the ledger so undo and history work across invocations.
pub(crate) fn save_history(vault: &Path, service: &HubService) {
    let path = history_file(vault);
    let records = service.export_history();
    let json = match serde_json::to_string_pretty(&records) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing history: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Error creating {}: {}", parent.display(), e);
            std::process::exit(1);
        }
    }
    if let Err(e) = fs::write(&path, json) {
        eprintln!("Error writing {}: {}", path.display(), e);
        std::process::exit(1);
    }
}
