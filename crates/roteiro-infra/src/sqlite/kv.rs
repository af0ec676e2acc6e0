//! SQLite key-value store implementation.
//!
//! Implements `KvStore` from `roteiro-core` using sqlx with split read/write
//! pools. Values are opaque text and are returned exactly as written.

use chrono::Utc;
use roteiro_core::storage::kv_store::KvStore;
use roteiro_types::error::RepositoryError;
use sqlx::Row;

use super::pool::{DatabasePool, repository_error};

/// SQLite-backed implementation of `KvStore`.
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: DatabasePool,
}

impl SqliteKvStore {
    /// Create a new KV store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(repository_error)?;

        row.map(|row| row.try_get::<String, _>("value"))
            .transpose()
            .map_err(repository_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"INSERT INTO kv_store (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(repository_error)?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(repository_error)?;

        Ok(())
    }
}
