//! Data types for parsed hub documents.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

/// Which classification rule identified a document as a hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Frontmatter `type:` field matched the configured value.
    FrontmatterField,
    /// The configured hub tag was present (inline or in frontmatter).
    Tag,
    /// The path matched an include-folder pattern.
    FolderPath,
}

impl DetectionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FrontmatterField => "frontmatter-field",
            Self::Tag => "tag",
            Self::FolderPath => "folder-path",
        }
    }
}

/// How often a living hub may be auto-updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpdateFrequency {
    /// Updated as soon as the change watcher settles.
    Immediate,
    /// At most one auto-update per calendar day.
    Daily,
    /// Only updated on an explicit trigger.
    #[default]
    Manual,
}

impl UpdateFrequency {
    /// Parse the frontmatter value. `"realtime"` is the documented on-disk
    /// spelling for [`Self::Immediate`]; anything unrecognised defaults to
    /// manual rather than erroring.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "realtime" | "immediate" => Self::Immediate,
            "daily" => Self::Daily,
            "manual" => Self::Manual,
            _ => Self::Manual,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Daily => "daily",
            Self::Manual => "manual",
        }
    }
}

/// A heading in the document tree. Children are owned; there are no parent
/// back-references (enclosing-heading lookups use the line map instead).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Heading level, 1..=6.
    pub level: u8,
    pub text: String,
    /// Zero-based line index.
    pub line: usize,
    pub children: Vec<Heading>,
}

/// A normalized link occurrence within a hub document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReference {
    /// Link target with any `#section` anchor stripped.
    pub target_path: String,
    /// Alias if present, otherwise the anchor-stripped target.
    pub display_text: String,
    /// Text of the nearest enclosing heading, if any.
    pub enclosing_heading: Option<String>,
    /// Zero-based line index.
    pub line: usize,
    /// Whether the occurrence falls inside the managed region.
    pub in_region: bool,
}

/// The marker-delimited managed region, as absolute character offsets into
/// the raw document text. `start` is just after the begin marker; `end` is
/// the first character of the end marker. Membership is half-open:
/// `[start, end)`.
///
/// "No managed region" is `Option::<Region>::None`, never a sentinel
/// offset. Offsets are recomputed on every parse and never reused across
/// writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn contains(&self, offset: usize) -> bool {
        (self.start..self.end).contains(&offset)
    }
}

/// A fully parsed hub document. Derived on demand from the raw text and
/// cached as a value; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct HubDocument {
    /// Store-relative path.
    pub path: PathBuf,
    /// Title: frontmatter `title:`, else first heading, else file stem.
    pub title: String,
    pub links: Vec<LinkReference>,
    /// Heading tree (roots in document order).
    pub headings: Vec<Heading>,
    pub detection_method: DetectionMethod,
    /// True only when auto-gathering is enabled and seed tags are set.
    pub is_living: bool,
    /// Lowercased, deduplicated seed tags.
    pub seed_tags: BTreeSet<String>,
    pub update_frequency: UpdateFrequency,
    pub region: Option<Region>,
}

impl HubDocument {
    /// Targets of links currently inside the managed region.
    pub fn in_region_targets(&self) -> BTreeSet<&str> {
        self.links
            .iter()
            .filter(|l| l.in_region)
            .map(|l| l.target_path.as_str())
            .collect()
    }
}
