//! CLI command definitions and dispatch for the `parley` binary.
//!
//! Uses clap derive macros for argument parsing. Running `parley` with no
//! subcommand opens the interactive chat.

pub mod chat;
pub mod history;
pub mod send;
pub mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::state::Overrides;

/// Chat with a local chat endpoint from the terminal.
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory holding config.toml and the chat database.
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Chat endpoint origin (overrides config.toml).
    #[arg(long, global = true, env = "PARLEY_ENDPOINT", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Send only the latest message instead of the whole conversation.
    #[arg(long, global = true)]
    pub single_turn: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Command-line settings that take precedence over `config.toml`.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            data_dir: self.data_dir.clone(),
            endpoint: self.endpoint.clone(),
            single_turn: self.single_turn,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (the default).
    Chat,

    /// Send one message and print the reply.
    Send {
        /// Message text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show the stored conversation.
    #[command(alias = "log")]
    History,

    /// Delete the stored conversation.
    Clear {
        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Show configuration, stored conversation size and endpoint health.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
