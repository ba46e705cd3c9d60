//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for the
//! conversation and the terminal.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Empty the conversation and delete the stored copy.
    Clear,
    /// Clear the terminal screen.
    Cls,
    /// Show the conversation so far.
    History,
    /// Show session phase, message count and endpoint.
    Status,
    /// Exit the chat session.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/reset" => Some(ChatCommand::Clear),
        "/cls" => Some(ChatCommand::Cls),
        "/history" => Some(ChatCommand::History),
        "/status" => Some(ChatCommand::Status),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Help text listing all available commands.
pub fn help_text() -> String {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Delete the conversation and its saved copy"),
        ("/cls", "Clear the screen"),
        ("/history", "Show the conversation so far"),
        ("/status", "Show session status"),
        ("/exit", "End the chat session"),
    ];

    let mut out = format!("\n  {}\n\n", style("Available commands:").bold());
    for (name, description) in rows {
        out.push_str(&format!("  {:<10} {description}\n", style(name).cyan()));
    }
    out.push_str(&format!(
        "\n  {}\n\n",
        style("Ctrl+D to exit. The conversation is saved after every reply.").dim()
    ));
    out
}
