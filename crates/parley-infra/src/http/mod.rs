//! HTTP adapter for the chat endpoint.
//!
//! Implements `ChatBackend` from `parley-core` with `reqwest`.

pub mod client;

pub use client::HttpChatBackend;
