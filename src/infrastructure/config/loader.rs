use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::models::Config;

/// Project-local directory holding config and database.
pub const CONFIG_DIR: &str = ".bmsync";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid rollover_hour: {0}. Must be between 0 and 23")]
    InvalidRolloverHour(u32),

    #[error("Invalid debounce_ms: {0}. Must be between 1 and 60000")]
    InvalidDebounce(u64),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid fetch_count: {0}. Must be between 1 and 500")]
    InvalidFetchCount(u32),

    #[error("Invalid base_url: {0}. Must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Invalid utc_offset_minutes: {0}. Must be within +/-840")]
    InvalidUtcOffset(i32),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Database path cannot be empty")]
    EmptyDatabasePath,

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `./.bmsync/`.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. .bmsync/config.yaml (created by `bmsync init`)
    /// 3. .bmsync/local.yaml (optional overrides)
    /// 4. Environment variables (`BMSYNC_` prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(CONFIG_DIR)
    }

    /// Same layering as [`ConfigLoader::load`] rooted at `dir`.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Config> {
        let dir = dir.as_ref();
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed("BMSYNC_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, without env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Path of the primary config file under `dir`.
    pub fn config_path(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join("config.yaml")
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let sync = &config.sync;
        if sync.rollover_hour > 23 {
            return Err(ConfigError::InvalidRolloverHour(sync.rollover_hour));
        }

        if sync.debounce_ms == 0 || sync.debounce_ms > 60_000 {
            return Err(ConfigError::InvalidDebounce(sync.debounce_ms));
        }

        if let Some(offset) = sync.utc_offset_minutes {
            if !(-840..=840).contains(&offset) {
                return Err(ConfigError::InvalidUtcOffset(offset));
            }
        }

        if sync.count_edits_tag.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "count_edits_tag cannot be empty".to_string(),
            ));
        }

        if sync.max_ancestor_depth == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_ancestor_depth must be at least 1".to_string(),
            ));
        }

        let beeminder = &config.beeminder;
        if beeminder.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(beeminder.timeout_secs));
        }

        if beeminder.fetch_count == 0 || beeminder.fetch_count > 500 {
            return Err(ConfigError::InvalidFetchCount(beeminder.fetch_count));
        }

        let url = &beeminder.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(beeminder.base_url.clone()));
        }

        if config.database.path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }

    /// Starter `config.yaml` written by `bmsync init`.
    pub fn template() -> &'static str {
        r#"# bmsync configuration
auth:
  user: ""
  token: ""

# Goal slug per metric. Leave blank to disable a metric.
goals:
  review_count: ""
  edit_count: ""
  maintained_progress: ""

enable_logging: false

sync:
  mode: delta
  debounce_ms: 1000
  rollover_hour: 0
  count_edits_tag: BmCountEdits

logging:
  level: info
  format: pretty
"#
    }
}
