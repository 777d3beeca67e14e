use serde::Deserialize;

/// Top-level engine configuration. Every section has working defaults, so
/// an absent config file means "defaults everywhere".
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub markers: MarkerConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How hub documents are recognised.
///
/// Priority: frontmatter field match, then tag presence, then folder
/// pattern. Exclusions always win over inclusions.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Expected value of the frontmatter `type:` field (case-insensitive).
    #[serde(default = "default_hub_marker")]
    pub field_value: String,
    /// Tag that marks a hub, checked inline and in frontmatter.
    #[serde(default = "default_hub_marker")]
    pub tag: String,
    /// Path substrings that classify a document as a hub.
    #[serde(default = "default_include_folders")]
    pub include_folders: Vec<String>,
    /// Path substrings that veto folder-based classification.
    #[serde(default = "default_exclude_folders")]
    pub exclude_folders: Vec<String>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            field_value: default_hub_marker(),
            tag: default_hub_marker(),
            include_folders: default_include_folders(),
            exclude_folders: default_exclude_folders(),
        }
    }
}

fn default_hub_marker() -> String {
    "moc".to_string()
}

fn default_include_folders() -> Vec<String> {
    ["maps", "mocs", "hubs", "atlas"].map(String::from).to_vec()
}

fn default_exclude_folders() -> Vec<String> {
    ["templates", "archive"].map(String::from).to_vec()
}

/// Literal strings delimiting the managed region. First occurrence of each
/// wins; the region is absent when either is missing or out of order.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkerConfig {
    #[serde(default = "default_begin_marker")]
    pub begin: String,
    #[serde(default = "default_end_marker")]
    pub end: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self { begin: default_begin_marker(), end: default_end_marker() }
    }
}

fn default_begin_marker() -> String {
    "<!-- BEGIN AUTO -->".to_string()
}

fn default_end_marker() -> String {
    "<!-- END AUTO -->".to_string()
}

/// Change watcher tuning.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Quiet period before a change event triggers immediate updates.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Tags whose presence makes a changed document worth reacting to.
    /// This is the cheap pre-filter, not the per-hub seed tag match.
    #[serde(default = "default_watch_tags")]
    pub seed_tags: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: default_debounce_ms(), seed_tags: default_watch_tags() }
    }
}

fn default_debounce_ms() -> u64 {
    5_000
}

fn default_watch_tags() -> Vec<String> {
    vec!["seed".to_string()]
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
