//! Storage abstractions for Parley.
//!
//! Defines the key-value store trait the chat log is persisted through.
//! Implementations live in parley-infra.

pub mod kv_store;
