//! mdhub-core: keeps hub documents in a markdown vault synchronized with
//! newly created seed notes.
//!
//! A hub document aggregates links to other notes inside a marker-
//! delimited managed region. The engine detects hubs, parses their
//! structure, matches freshly tagged seed notes against each living hub's
//! filter, patches the managed region in place without touching hand-
//! authored content, keeps a bounded undo history, and reacts to content
//! change events with per-path debouncing.

pub mod clock;
pub mod config;
pub mod frontmatter;
pub mod hub;
pub mod seeds;
pub mod service;
pub mod store;
pub mod tags;
pub mod update;
pub mod watch;

pub use service::HubService;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
