//! One-shot `parley send` command.

use std::time::Duration;

use anyhow::Result;
use console::style;
use crossterm::style::Color;
use indicatif::{ProgressBar, ProgressStyle};

use parley_types::session::TurnOutcome;

use crate::cli::chat::renderer::ChatRenderer;
use crate::state::AppState;

/// Send `text` as the next turn of the stored conversation and print the reply.
///
/// The turn goes through the same controller as the interactive chat, so a
/// successful reply is appended to the stored log.
pub async fn send_message(state: &AppState, text: &str, json: bool) -> Result<()> {
    let mut controller = state.controller().await;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("waiting for reply...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let outcome = controller.submit_text(text).await?;
    spinner.finish_and_clear();

    let Some(outcome) = outcome else {
        if !json {
            println!();
            println!("  {} Nothing to send.", style("i").blue().bold());
            println!();
        }
        return Ok(());
    };

    let message = controller
        .log()
        .last()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Conversation is empty after a completed turn"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&message)?);
    } else {
        print!("{}", ChatRenderer::new(Some(Color::Cyan)).render_message(&message));
        println!();
    }

    if let TurnOutcome::Failed { error } = outcome {
        anyhow::bail!("Chat request failed: {error}");
    }
    Ok(())
}
