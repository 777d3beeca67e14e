//! Engine configuration: hub detection rules, region markers, watcher
//! tuning, and logging.

pub mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader};
pub use types::{
    DetectionConfig, EngineConfig, LoggingConfig, MarkerConfig, WatchConfig,
};
