//! Shared domain types for Parley.
//!
//! This crate contains the types used across the Parley workspace:
//! chat messages and the chat log, the chat endpoint wire format, client
//! configuration, session phases, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod message;
pub mod session;
pub mod storage;
pub mod wire;
