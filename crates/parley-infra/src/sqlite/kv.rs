//! SQLite key-value store implementation.
//!
//! Implements `KvStore` from `parley-core` using sqlx with split read/write pools.
//! Values are opaque text; the chat log is stored as its JSON serialization.

use chrono::{DateTime, Utc};
use parley_core::storage::kv_store::KvStore;
use parley_types::error::StoreError;
use parley_types::storage::KvEntry;
use sqlx::Row;

use super::pool::DatabasePool;

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

    /// List all keys in the store, sorted.
    pub async fn list_keys(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut keys = Vec::with_capacity(rows.len());
        for row in &rows {
            let key: String = row
                .try_get("key")
                .map_err(|e| StoreError::Query(e.to_string()))?;
            keys.push(key);
        }

        Ok(keys)
    }

    /// Get the full entry including timestamps.
    pub async fn get_entry(&self, key: &str) -> Result<Option<KvEntry>, StoreError> {
        let row = sqlx::query("SELECT * FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let kv_row =
                    KvRow::from_row(&row).map_err(|e| StoreError::Query(e.to_string()))?;
                Ok(Some(kv_row.into_entry()?))
            }
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct KvRow {
    key: String,
    value: String,
    created_at: String,
    updated_at: String,
}

impl KvRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            key: row.try_get("key")?,
            value: row.try_get("value")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_entry(self) -> Result<KvEntry, StoreError> {
        Ok(KvEntry {
            key: self.key,
            value: self.value,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Query(format!("invalid datetime: {e}")))
}

// ---------------------------------------------------------------------------
// KvStore implementation
// ---------------------------------------------------------------------------

impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let value: String = row
                    .try_get("value")
                    .map_err(|e| StoreError::Query(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
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
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::chat::history::ChatLogStore;
    use parley_types::message::{ChatLog, Message};

    async fn test_store() -> SqliteKvStore {
        let dir = tempfile::tempdir().unwrap();
        let pool = DatabasePool::open_in(dir.path()).await.unwrap();
        std::mem::forget(dir);
        SqliteKvStore::new(pool)
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let store = test_store().await;

        store.set("settings", r#"{"theme":"dark"}"#).await.unwrap();

        let got = store.get("settings").await.unwrap();
        assert_eq!(got.as_deref(), Some(r#"{"theme":"dark"}"#));
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let store = test_store().await;
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_upserts() {
        let store = test_store().await;

        store.set("counter", "1").await.unwrap();
        let first = store.get_entry("counter").await.unwrap().unwrap();
        store.set("counter", "2").await.unwrap();
        let second = store.get_entry("counter").await.unwrap().unwrap();

        assert_eq!(second.value, "2");
        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = test_store().await;

        store.set("temp", "value").await.unwrap();
        store.delete("temp").await.unwrap();

        assert!(store.get("temp").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_noop() {
        let store = test_store().await;
        store.delete("nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_keys() {
        let store = test_store().await;

        store.set("beta", "b").await.unwrap();
        store.set("alpha", "a").await.unwrap();
        store.set("gamma", "g").await.unwrap();

        assert_eq!(store.list_keys().await.unwrap(), vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn test_values_are_stored_verbatim() {
        let store = test_store().await;

        // Not JSON; the store does not interpret values.
        store.set("chatLog", "[{\"type\":").await.unwrap();

        assert_eq!(store.get("chatLog").await.unwrap().as_deref(), Some("[{\"type\":"));
    }

    #[tokio::test]
    async fn test_chat_log_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let log = ChatLog::from(vec![Message::user("hello"), Message::bot("hi there")]);

        {
            let pool = DatabasePool::open_in(dir.path()).await.unwrap();
            let history = ChatLogStore::with_default_key(SqliteKvStore::new(pool));
            history.persist(&log).await.unwrap();
        }

        let pool = DatabasePool::open_in(dir.path()).await.unwrap();
        let history = ChatLogStore::with_default_key(SqliteKvStore::new(pool));
        assert_eq!(history.load().await, log);
    }
}
