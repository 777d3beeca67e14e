use mdhub_core::config::EngineConfig;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub fn init(cfg: &EngineConfig) {
    let level = parse_level(&cfg.logging.level).unwrap_or(LevelFilter::INFO);

    // RUST_LOG still wins over the configured level.
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(layer).init();
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
