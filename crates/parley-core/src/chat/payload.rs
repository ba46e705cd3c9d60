//! Request body construction for the chat endpoint.

use parley_types::message::Message;
use parley_types::wire::{ChatRequest, RequestShape, WireMessage, WireRole};

/// Build the request body for one turn.
///
/// `history` is the conversation *before* the latest input. For
/// [`RequestShape::FullHistory`] the body is the system prompt, then every
/// prior message, then `latest` as a user message. For
/// [`RequestShape::SingleTurn`] only `latest` is sent.
pub fn build_request(
    shape: RequestShape,
    system_prompt: &str,
    history: &[Message],
    latest: &str,
) -> ChatRequest {
    match shape {
        RequestShape::FullHistory => {
            let mut messages = Vec::with_capacity(history.len() + 2);
            messages.push(WireMessage::new(WireRole::System, system_prompt));
            messages.extend(history.iter().map(WireMessage::from));
            messages.push(WireMessage::new(WireRole::User, latest));
            ChatRequest::History { messages }
        }
        RequestShape::SingleTurn => ChatRequest::SingleTurn {
            user_message: latest.to_string(),
        },
    }
}
