//! Settings port.

use async_trait::async_trait;

/// Host settings, keyed by the ids in `domain::models::settings::keys`.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// `None` when unset or blank.
    async fn get_string(&self, key: &str) -> Option<String>;

    async fn get_bool(&self, key: &str) -> bool;
}
