//! Chat session logic and port trait definitions for Parley.
//!
//! This crate defines the "ports" (`KvStore`, `ChatBackend`) that the
//! infrastructure layer implements, plus the chat session controller that
//! drives them. It depends only on `parley-types` -- never on
//! `parley-infra` or any database/HTTP crate.

pub mod backend;
pub mod chat;
pub mod storage;
