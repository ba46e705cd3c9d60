//! Wire format for the chat endpoint (`POST /chat`, `GET /`).
//!
//! Two request bodies exist for the same endpoint:
//! - full history: `{"messages": [{"role": ..., "content": ...}, ...]}`
//! - single turn:  `{"user_message": "..."}`
//!
//! A client picks one via [`RequestShape`] and sticks with it. Replies are
//! always `{"bot_response": "..."}`.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::message::{Message, MessageKind};

/// Role of a message in the full-history request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for WireRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireRole::System => write!(f, "system"),
            WireRole::User => write!(f, "user"),
            WireRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One `{role, content}` pair in the full-history request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: WireRole,
    pub content: String,
}

impl WireMessage {
    pub fn new(role: WireRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<&Message> for WireMessage {
    /// User messages map to `user`; bot and error messages both map to `assistant`.
    fn from(message: &Message) -> Self {
        let role = match message.kind {
            MessageKind::User => WireRole::User,
            MessageKind::Bot | MessageKind::Error => WireRole::Assistant,
        };
        Self::new(role, message.text.clone())
    }
}

/// Request body sent to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatRequest {
    /// System prompt, prior conversation, then the latest user input.
    History { messages: Vec<WireMessage> },
    /// Only the latest user input; the backend keeps any memory itself.
    SingleTurn { user_message: String },
}

impl ChatRequest {
    /// The user input this request carries (last `user` message for history bodies).
    pub fn latest_input(&self) -> Option<&str> {
        match self {
            ChatRequest::History { messages } => messages
                .iter()
                .rev()
                .find(|m| m.role == WireRole::User)
                .map(|m| m.content.as_str()),
            ChatRequest::SingleTurn { user_message } => Some(user_message),
        }
    }
}

/// Successful reply body from the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub bot_response: String,
}

/// Body of the endpoint's health route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Which request body a client sends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestShape {
    #[default]
    FullHistory,
    SingleTurn,
}

impl fmt::Display for RequestShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestShape::FullHistory => write!(f, "full_history"),
            RequestShape::SingleTurn => write!(f, "single_turn"),
        }
    }
}

impl FromStr for RequestShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "full_history" => Ok(RequestShape::FullHistory),
            "single_turn" => Ok(RequestShape::SingleTurn),
            other => Err(format!("invalid request shape: '{other}'")),
        }
    }
}
