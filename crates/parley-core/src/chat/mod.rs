//! Chat session state machine and chat log persistence for Parley.
//!
//! - `controller`: the session controller (`initialize`, `submit`, `clear`)
//! - `history`: load-or-default persistence of the chat log through a `KvStore`
//! - `payload`: request body construction for the chat endpoint
//! - `state`: the draft/log/phase triple the controller owns

pub mod controller;
pub mod history;
pub mod payload;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;
