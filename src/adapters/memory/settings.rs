use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::models::settings::definition;
use crate::domain::ports::SettingsStore;

/// Mutable settings map, standing in for the host settings store.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    strings: RwLock<HashMap<String, String>>,
    bools: RwLock<HashMap<String, bool>>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_string(&self, key: &str, value: impl Into<String>) {
        self.strings.write().await.insert(key.to_string(), value.into());
    }

    pub async fn set_bool(&self, key: &str, value: bool) {
        self.bools.write().await.insert(key.to_string(), value);
    }

    pub async fn remove(&self, key: &str) {
        self.strings.write().await.remove(key);
        self.bools.write().await.remove(key);
    }
}

#[async_trait]
impl SettingsStore for InMemorySettings {
    async fn get_string(&self, key: &str) -> Option<String> {
        self.strings
            .read()
            .await
            .get(key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }

    async fn get_bool(&self, key: &str) -> bool {
        match self.bools.read().await.get(key) {
            Some(value) => *value,
            None => definition(key).is_some_and(|d| d.default_enabled),
        }
    }
}
