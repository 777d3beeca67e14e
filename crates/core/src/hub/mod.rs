//! Hub document detection and structural parsing.
//!
//! A hub document aggregates links to other notes under a managed,
//! marker-delimited region. This module classifies documents as hubs,
//! parses their heading hierarchy and links with positional context,
//! locates the managed region, and memoizes the results.

pub mod cache;
pub mod headings;
pub mod links;
pub mod parser;
pub mod region;
pub mod types;

pub use cache::ParseCache;
pub use headings::{build_heading_map, parse_headings};
pub use links::{resolve_links, scan_occurrences, LinkOccurrence};
pub use parser::{classify, parse_hub};
pub use region::locate_region;
pub use types::{
    DetectionMethod, Heading, HubDocument, LinkReference, Region, UpdateFrequency,
};
