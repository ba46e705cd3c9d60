//! Interactive chat session in the terminal.
//!
//! Restores the stored conversation, reads lines with an async readline,
//! sends each one through the chat controller and renders replies as
//! markdown. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
