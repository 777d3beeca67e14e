//! Seed note snapshots and matching.
//!
//! A seed note is a small, taggable note eligible to be gathered into a
//! hub document. The catalog snapshots the corpus at query time; the
//! matcher pairs a hub's tag filter against those snapshots.

pub mod catalog;
pub mod matcher;
pub mod types;

pub use catalog::SeedCatalog;
pub use matcher::find_matching_seeds;
pub use types::SeedNote;
