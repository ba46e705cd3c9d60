//! Chat session controller.
//!
//! `ChatController` owns the session state (draft, chat log, phase) and
//! mediates between user actions, the chat endpoint and the persisted log.
//!
//! A submission is split in two halves so callers can keep handling input
//! while a reply is outstanding:
//! 1. [`ChatController::begin_turn`] appends the user message, clears the
//!    draft, enters `Pending` and returns the request to send.
//! 2. [`ChatController::complete_turn`] appends the bot (or error) message,
//!    persists on success and returns to `Idle`.
//!
//! [`ChatController::submit`] runs both halves back to back.

use std::sync::Arc;

use parley_types::config::ClientConfig;
use parley_types::error::{BackendError, SessionError, StoreError};
use parley_types::message::{ChatLog, Message};
use parley_types::session::{SessionPhase, TurnOutcome};
use parley_types::wire::{ChatReply, ChatRequest, RequestShape};
use tracing::{debug, info, warn};

use crate::backend::provider::ChatBackend;
use crate::chat::history::ChatLogStore;
use crate::chat::payload::build_request;
use crate::chat::state::SessionState;
use crate::storage::kv_store::KvStore;

/// How the controller builds request bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub request_shape: RequestShape,
    pub system_prompt: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from(&ClientConfig::default())
    }
}

impl From<&ClientConfig> for ControllerOptions {
    fn from(config: &ClientConfig) -> Self {
        Self {
            request_shape: config.request_shape,
            system_prompt: config.system_prompt.clone(),
        }
    }
}

/// A submission that has started and awaits its reply.
///
/// Hand the result of sending [`PendingTurn::request`] back to
/// [`ChatController::complete_turn`]; until then the session stays `Pending`.
#[derive(Debug)]
#[must_use = "the session stays pending until the turn is completed"]
pub struct PendingTurn {
    request: ChatRequest,
    input: String,
}

impl PendingTurn {
    /// The request body for this turn.
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// The raw user input that started this turn.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Send this turn's request through `backend`.
    pub async fn send<B: ChatBackend>(&self, backend: &B) -> Result<ChatReply, BackendError> {
        backend.send(&self.request).await
    }
}

/// Owns one chat session and drives its `Idle -> Pending -> Idle` cycle.
///
/// Generic over `ChatBackend` and `KvStore`; the concrete HTTP and SQLite
/// implementations are pinned in the binary.
pub struct ChatController<B: ChatBackend, S: KvStore> {
    backend: Arc<B>,
    history: ChatLogStore<S>,
    options: ControllerOptions,
    state: SessionState,
}

impl<B: ChatBackend, S: KvStore> ChatController<B, S> {
    /// Create a controller with an empty log. Call [`Self::initialize`] to
    /// restore the persisted log.
    pub fn new(backend: Arc<B>, history: ChatLogStore<S>, options: ControllerOptions) -> Self {
        Self {
            backend,
            history,
            options,
            state: SessionState::default(),
        }
    }

    /// Restore the persisted chat log (empty when absent or malformed).
    pub async fn initialize(&mut self) {
        self.state.log = self.history.load().await;
        info!(
            backend = self.backend.name(),
            messages = self.state.log.len(),
            "Chat session initialized"
        );
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn history(&self) -> &ChatLogStore<S> {
        &self.history
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn log(&self) -> &ChatLog {
        &self.state.log
    }

    pub fn draft(&self) -> &str {
        &self.state.draft
    }

    /// Replace the draft input.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.state.draft = text.into();
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Start submitting the current draft.
    ///
    /// Returns `Ok(None)` without touching any state when the draft is empty
    /// or whitespace-only. Otherwise the raw draft is appended as a user
    /// message, the draft is cleared and the session enters `Pending`.
    ///
    /// # Errors
    ///
    /// [`SessionError::Busy`] while another turn is pending.
    pub fn begin_turn(&mut self) -> Result<Option<PendingTurn>, SessionError> {
        if self.state.is_pending() {
            return Err(SessionError::Busy);
        }
        if !self.state.has_submittable_draft() {
            debug!("Ignoring empty submission");
            return Ok(None);
        }

        let input = std::mem::take(&mut self.state.draft);
        let request = build_request(
            self.options.request_shape,
            &self.options.system_prompt,
            self.state.log.messages(),
            &input,
        );
        self.state.log.push(Message::user(input.clone()));
        self.state.phase = SessionPhase::Pending;

        info!(
            shape = %self.options.request_shape,
            history = self.state.log.len() - 1,
            "Turn started"
        );
        Ok(Some(PendingTurn { request, input }))
    }

    /// Resolve a pending turn with the endpoint's result.
    ///
    /// Success appends one bot message and persists the whole log. Any
    /// failure appends the generic error message and persists nothing.
    /// The session is back to `Idle` either way.
    pub async fn complete_turn(
        &mut self,
        turn: PendingTurn,
        result: Result<ChatReply, BackendError>,
    ) -> TurnOutcome {
        let outcome = match result {
            Ok(reply) => {
                self.state.log.push(Message::bot(reply.bot_response.clone()));
                if let Err(e) = self.history.persist(&self.state.log).await {
                    warn!(error = %e, "Failed to persist chat log after reply");
                }
                info!(reply_len = reply.bot_response.len(), "Turn replied");
                TurnOutcome::Replied {
                    reply: reply.bot_response,
                }
            }
            Err(e) => {
                warn!(error = %e, input_len = turn.input.len(), "Turn failed");
                self.state.log.push(Message::generic_error());
                TurnOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        self.state.phase = SessionPhase::Idle;
        outcome
    }

    /// Submit the current draft and wait for the reply.
    ///
    /// Returns `Ok(None)` for an empty or whitespace-only draft (no request
    /// is made).
    pub async fn submit(&mut self) -> Result<Option<TurnOutcome>, SessionError> {
        let Some(turn) = self.begin_turn()? else {
            return Ok(None);
        };
        let backend = Arc::clone(&self.backend);
        let result = turn.send(backend.as_ref()).await;
        Ok(Some(self.complete_turn(turn, result).await))
    }

    /// Set the draft to `text` and submit it.
    pub async fn submit_text(
        &mut self,
        text: impl Into<String>,
    ) -> Result<Option<TurnOutcome>, SessionError> {
        self.set_draft(text);
        self.submit().await
    }

    /// Empty the chat log and delete the persisted copy.
    ///
    /// Does not touch the phase: a turn already in flight still appends its
    /// reply (or error) to the emptied log when it completes.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.state.log.clear();
        self.history.forget().await?;
        info!(pending = self.state.is_pending(), "Chat log cleared");
        Ok(())
    }
}
