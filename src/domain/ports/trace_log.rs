//! Trace log port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::errors::DomainResult;

/// One human-readable line in the host-visible log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub message: String,
}

/// Host-managed log node the trace lines are attached under.
#[async_trait]
pub trait TraceLog: Send + Sync {
    async fn append(&self, message: &str) -> DomainResult<()>;

    /// The newest `limit` entries, oldest first.
    async fn recent(&self, limit: usize) -> DomainResult<Vec<TraceEntry>>;

    async fn count(&self) -> DomainResult<u64>;

    /// Remove the whole log.
    async fn clear(&self) -> DomainResult<()>;
}
