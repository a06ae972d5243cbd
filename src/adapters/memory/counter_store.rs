use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::errors::DomainResult;
use crate::domain::ports::{CounterKey, CounterStore};

/// Counter store that lives for the process only.
#[derive(Debug, Default)]
pub struct InMemoryCounterStore {
    values: RwLock<HashMap<String, u64>>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys ever written.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn get(&self, key: &CounterKey) -> DomainResult<u64> {
        Ok(self.values.read().await.get(key.as_str()).copied().unwrap_or(0))
    }

    async fn set(&self, key: &CounterKey, value: u64) -> DomainResult<()> {
        self.values.write().await.insert(key.as_str().to_string(), value);
        Ok(())
    }
}
