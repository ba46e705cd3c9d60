//! Infrastructure layer for Parley.
//!
//! Contains implementations of the port traits defined in `parley-core`:
//! a SQLite-backed key-value store for the chat log and an HTTP client for
//! the chat endpoint, plus config loading and data directory resolution.

pub mod config;
pub mod http;
pub mod sqlite;
