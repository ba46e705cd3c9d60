//! Chat message and chat log types.
//!
//! A `Message` is one entry of the conversation as shown to the user: what
//! the user typed, what the bot answered, or the generic failure notice.
//! The `ChatLog` is the ordered conversation; its JSON form is exactly what
//! gets persisted under the storage key.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Text of the message appended when a turn fails for any reason.
pub const GENERIC_ERROR_TEXT: &str = "Sorry, something went wrong. Please try again.";

/// Who (or what) produced a message.
///
/// Serialized lowercase: `"user"`, `"bot"`, `"error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    User,
    Bot,
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::User => write!(f, "user"),
            MessageKind::Bot => write!(f, "bot"),
            MessageKind::Error => write!(f, "error"),
        }
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageKind::User),
            "bot" => Ok(MessageKind::Bot),
            "error" => Ok(MessageKind::Error),
            other => Err(format!("invalid message kind: '{other}'")),
        }
    }
}

/// A single entry in the chat log. Immutable once created.
///
/// The persisted JSON uses the key `type` for the kind:
/// `{"type": "user", "text": "hello"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub text: String,
}

impl Message {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageKind::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Bot, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, text)
    }

    /// The fixed, user-facing failure message.
    pub fn generic_error() -> Self {
        Self::error(GENERIC_ERROR_TEXT)
    }
}

/// Ordered sequence of messages for the session.
///
/// Append-only during a session, except for a full reset via [`ChatLog::clear`].
/// Serializes transparently as a JSON array of [`Message`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatLog(Vec<Message>);

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the end of the log.
    pub fn push(&mut self, message: Message) {
        self.0.push(message);
    }

    /// Reset the log to the empty sequence.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.0.last()
    }

    /// Number of messages of the given kind.
    pub fn count(&self, kind: MessageKind) -> usize {
        self.0.iter().filter(|m| m.kind == kind).count()
    }
}

impl From<Vec<Message>> for ChatLog {
    fn from(messages: Vec<Message>) -> Self {
        Self(messages)
    }
}

impl<'a> IntoIterator for &'a ChatLog {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
