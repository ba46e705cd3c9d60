//! Key-value store trait.
//!
//! Defines the string-valued get/set/delete interface the chat log is
//! persisted through. Implementations live in parley-infra.

use parley_types::error::StoreError;

/// Trait for process-external, string-valued key-value storage.
///
/// No expiry and no versioning: a key either holds the last value written
/// or is absent. Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Delete a key. No-op if key does not exist.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
