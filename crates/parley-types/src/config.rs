//! Client configuration types for Parley.
//!
//! `ClientConfig` represents the `config.toml` in the data directory that
//! points the client at a chat endpoint and picks the request body shape.

use serde::{Deserialize, Serialize};

use crate::wire::RequestShape;

/// Top-level configuration for the Parley client.
///
/// Loaded from `~/.parley/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin of the chat endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Path of the chat route on the endpoint.
    #[serde(default = "default_chat_path")]
    pub chat_path: String,

    /// Which request body to send.
    #[serde(default)]
    pub request_shape: RequestShape,

    /// System prompt sent first in full-history requests.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Key under which the chat log is persisted.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Per-request timeout in seconds. Unset means wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    "http://localhost:8000".to_string()
}

fn default_chat_path() -> String {
    "/chat".to_string()
}

fn default_system_prompt() -> String {
    "You are a helpful assistant.".to_string()
}

fn default_storage_key() -> String {
    "chatLog".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            chat_path: default_chat_path(),
            request_shape: RequestShape::default(),
            system_prompt: default_system_prompt(),
            storage_key: default_storage_key(),
            request_timeout_secs: None,
        }
    }
}
