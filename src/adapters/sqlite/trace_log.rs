//! SQLite implementation of the TraceLog.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::adapters::sqlite::parse_datetime;
use crate::domain::errors::DomainResult;
use crate::domain::ports::{TraceEntry, TraceLog};

pub struct SqliteTraceLog {
    pool: SqlitePool,
}

impl SqliteTraceLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TraceRow {
    id: i64,
    created_at: String,
    message: String,
}

impl TryFrom<TraceRow> for TraceEntry {
    type Error = crate::domain::errors::DomainError;

    fn try_from(row: TraceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            created_at: parse_datetime(&row.created_at)?,
            message: row.message,
        })
    }
}

#[async_trait]
impl TraceLog for SqliteTraceLog {
    async fn append(&self, message: &str) -> DomainResult<()> {
        sqlx::query("INSERT INTO trace_log (created_at, message) VALUES (?, ?)")
            .bind(Utc::now().to_rfc3339())
            .bind(message)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> DomainResult<Vec<TraceEntry>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut rows: Vec<TraceRow> = sqlx::query_as(
            "SELECT id, created_at, message FROM trace_log ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.reverse();
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn count(&self) -> DomainResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trace_log")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn clear(&self) -> DomainResult<()> {
        sqlx::query("DELETE FROM trace_log").execute(&self.pool).await?;
        Ok(())
    }
}
