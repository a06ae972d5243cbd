use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::metric::MetricId;
use super::sync::DecisionMode;

/// Main configuration structure for bmsync
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Beeminder credentials
    #[serde(default)]
    pub auth: AuthSettings,

    /// Goal slug per metric
    #[serde(default)]
    pub goals: GoalsConfig,

    /// Write trace lines to the host-visible log
    #[serde(default)]
    pub enable_logging: bool,

    /// Beeminder API configuration
    #[serde(default)]
    pub beeminder: BeeminderConfig,

    /// Sync behaviour
    #[serde(default)]
    pub sync: SyncConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Beeminder account credentials. Either may be unset.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuthSettings {
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub token: Option<String>,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Goal slugs. A metric without a slug is never synced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GoalsConfig {
    #[serde(default)]
    pub review_count: Option<String>,

    #[serde(default)]
    pub edit_count: Option<String>,

    #[serde(default)]
    pub maintained_progress: Option<String>,
}

impl GoalsConfig {
    pub fn slug(&self, metric: MetricId) -> Option<&str> {
        match metric {
            MetricId::ReviewCount => self.review_count.as_deref(),
            MetricId::EditCount => self.edit_count.as_deref(),
            MetricId::MaintainedProgress => self.maintained_progress.as_deref(),
        }
    }
}

/// Beeminder API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BeeminderConfig {
    /// API root, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of recent datapoints fetched when looking for the latest
    #[serde(default = "default_fetch_count")]
    pub fetch_count: u32,

    /// Name used in the datapoint comment, "via <source> integration"
    #[serde(default = "default_comment_source")]
    pub comment_source: String,
}

fn default_base_url() -> String {
    "https://www.beeminder.com/api/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_fetch_count() -> u32 {
    10
}

fn default_comment_source() -> String {
    "RemNote".to_string()
}

impl Default for BeeminderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            fetch_count: default_fetch_count(),
            comment_source: default_comment_source(),
        }
    }
}

/// Sync behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SyncConfig {
    /// Decision policy: delta or absolute
    #[serde(default)]
    pub mode: DecisionMode,

    /// Quiescence window for edit bursts
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Local hour (0-23) at which a new day starts
    #[serde(default)]
    pub rollover_hour: u32,

    /// Fixed UTC offset; the system offset is used when unset
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,

    /// Tag text that marks a subtree for edit counting
    #[serde(default = "default_count_edits_tag")]
    pub count_edits_tag: String,

    /// Cap on ancestor hops when resolving tags
    #[serde(default = "default_max_ancestor_depth")]
    pub max_ancestor_depth: usize,
}

const fn default_debounce_ms() -> u64 {
    1000
}

fn default_count_edits_tag() -> String {
    "BmCountEdits".to_string()
}

const fn default_max_ancestor_depth() -> usize {
    256
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            mode: DecisionMode::default(),
            debounce_ms: default_debounce_ms(),
            rollover_hour: 0,
            utc_offset_minutes: None,
            count_edits_tag: default_count_edits_tag(),
            max_ancestor_depth: default_max_ancestor_depth(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,
}

fn default_database_path() -> String {
    ".bmsync/bmsync.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Rotation for file output: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}
