//! ChatBackend trait definition.

use parley_types::error::BackendError;
use parley_types::wire::{ChatReply, ChatRequest, HealthStatus};

/// Trait for the chat endpoint a session talks to.
///
/// One call to [`ChatBackend::send`] per submitted message; a failed call is
/// final for that turn (no retry). Implementations live in parley-infra
/// (e.g., `HttpChatBackend`).
pub trait ChatBackend: Send + Sync {
    /// Human-readable backend name for logs (e.g., the endpoint URL).
    fn name(&self) -> &str;

    /// Send one request body and wait for the reply.
    ///
    /// Non-success status, transport failure and an unparseable body are all
    /// errors.
    fn send(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatReply, BackendError>> + Send;

    /// Probe the endpoint's health route.
    fn health(&self) -> impl std::future::Future<Output = Result<HealthStatus, BackendError>> + Send;
}
