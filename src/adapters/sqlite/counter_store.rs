//! SQLite implementation of the CounterStore.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::{CounterKey, CounterStore};

pub struct SqliteCounterStore {
    pool: SqlitePool,
}

impl SqliteCounterStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CounterStore for SqliteCounterStore {
    async fn get(&self, key: &CounterKey) -> DomainResult<u64> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT value FROM counters WHERE key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map_or(Ok(0), |(value,)| {
            u64::try_from(value).map_err(|_| {
                DomainError::StorageError(format!("negative counter {value} for {key}"))
            })
        })
    }

    async fn set(&self, key: &CounterKey, value: u64) -> DomainResult<()> {
        let value = i64::try_from(value)
            .map_err(|_| DomainError::ValidationFailed(format!("counter {value} out of range")))?;

        sqlx::query(
            r#"INSERT INTO counters (key, value, updated_at)
               VALUES (?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
               ON CONFLICT(key) DO UPDATE
               SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key.as_str())
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
