use thiserror::Error;

/// Errors from talking to the chat endpoint.
///
/// The session controller collapses every variant into the same
/// user-facing error message; the distinction only reaches the logs.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Errors from key-value store operations (used by trait definitions in parley-core).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors from driving the chat session state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a reply is still pending; wait for it before sending another message")]
    Busy,
}
