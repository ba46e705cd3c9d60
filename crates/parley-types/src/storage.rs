//! Storage types for Parley.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw entry in the persistent key-value store, with timestamps.
///
/// Values are opaque strings; the chat log is stored as its JSON text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvEntry {
    pub key: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KvEntry {
    /// Size of the stored value in bytes.
    pub fn size_bytes(&self) -> usize {
        self.value.len()
    }
}
