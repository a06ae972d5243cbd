use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{TraceEntry, TraceLog};

/// Trace log kept in memory. Can be told to fail, to exercise the
/// swallow-on-failure path.
#[derive(Debug, Default)]
pub struct InMemoryTraceLog {
    entries: RwLock<Vec<TraceEntry>>,
    failing: AtomicBool,
}

impl InMemoryTraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All messages, oldest first.
    pub async fn messages(&self) -> Vec<String> {
        self.entries.read().await.iter().map(|e| e.message.clone()).collect()
    }

    fn check(&self) -> DomainResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::HostReadFailed("log node unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TraceLog for InMemoryTraceLog {
    async fn append(&self, message: &str) -> DomainResult<()> {
        self.check()?;
        let mut entries = self.entries.write().await;
        let id = entries.last().map_or(1, |e| e.id + 1);
        entries.push(TraceEntry {
            id,
            created_at: Utc::now(),
            message: message.to_string(),
        });
        Ok(())
    }

    async fn recent(&self, limit: usize) -> DomainResult<Vec<TraceEntry>> {
        self.check()?;
        let entries = self.entries.read().await;
        let skip = entries.len().saturating_sub(limit);
        Ok(entries[skip..].to_vec())
    }

    async fn count(&self) -> DomainResult<u64> {
        self.check()?;
        Ok(self.entries.read().await.len() as u64)
    }

    async fn clear(&self) -> DomainResult<()> {
        self.check()?;
        self.entries.write().await.clear();
        Ok(())
    }
}
