//! Chat log persistence.
//!
//! `ChatLogStore` keeps the serialized chat log under one fixed key of a
//! `KvStore`. Loading is lenient: a missing key, unparseable JSON, or a
//! failing store all yield an empty log.

use parley_types::error::StoreError;
use parley_types::message::ChatLog;
use tracing::{debug, warn};

use crate::storage::kv_store::KvStore;

/// Default key the chat log is stored under.
pub const DEFAULT_LOG_KEY: &str = "chatLog";

/// Reads and writes the persisted chat log.
///
/// Generic over `KvStore` to maintain clean architecture
/// (parley-core never depends on parley-infra).
pub struct ChatLogStore<S: KvStore> {
    store: S,
    key: String,
}

impl<S: KvStore> ChatLogStore<S> {
    /// Create a log store writing under `key`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Create a log store writing under [`DEFAULT_LOG_KEY`].
    pub fn with_default_key(store: S) -> Self {
        Self::new(store, DEFAULT_LOG_KEY)
    }

    /// Access the underlying key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The key the log is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted log, falling back to an empty log.
    ///
    /// Absent and malformed values are treated the same; only the latter is
    /// logged at `warn`.
    pub async fn load(&self) -> ChatLog {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No persisted chat log, starting empty");
                return ChatLog::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read chat log, starting empty");
                return ChatLog::new();
            }
        };

        match serde_json::from_str::<ChatLog>(&raw) {
            Ok(log) => {
                debug!(key = %self.key, messages = log.len(), "Chat log restored");
                log
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Persisted chat log is malformed, starting empty");
                ChatLog::new()
            }
        }
    }

    /// Overwrite the persisted log with `log`.
    pub async fn persist(&self, log: &ChatLog) -> Result<(), StoreError> {
        let raw = serde_json::to_string(log)
            .map_err(|e| StoreError::Serialization(format!("failed to serialize chat log: {e}")))?;
        self.store.set(&self.key, &raw).await?;
        debug!(key = %self.key, messages = log.len(), "Chat log persisted");
        Ok(())
    }

    /// Delete the persisted log.
    pub async fn forget(&self) -> Result<(), StoreError> {
        self.store.delete(&self.key).await?;
        debug!(key = %self.key, "Chat log deleted");
        Ok(())
    }
}
