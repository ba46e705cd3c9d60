//! Main chat loop orchestration.
//!
//! Input and replies are multiplexed with `tokio::select!`: a submitted line
//! starts a turn whose request runs on a spawned task, and the reply comes
//! back over a channel. Slash commands keep working while a reply is
//! pending; new messages are refused until it arrives.

use std::io::Write;
use std::sync::Arc;

use console::style;
use crossterm::style::Color;
use rustyline_async::SharedWriter;
use tokio::sync::mpsc;
use tracing::{debug, info};

use parley_core::chat::controller::PendingTurn;
use parley_types::error::{BackendError, SessionError};
use parley_types::session::TurnOutcome;
use parley_types::wire::ChatReply;

use crate::state::{AppState, ConcreteController};

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

type TurnResult = (PendingTurn, Result<ChatReply, BackendError>);

/// Whether the loop keeps running after handling an event.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Run the interactive chat loop until the user exits.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let mut controller = state.controller().await;
    let renderer = ChatRenderer::new(Some(Color::Cyan));

    print_welcome_banner(
        &state.config.endpoint,
        state.config.request_shape,
        controller.log().len(),
    );
    if !controller.log().is_empty() {
        print!("{}", renderer.render_log(controller.log()));
        println!();
    }

    let idle_prompt = format!("  {} ", style("You >").green().bold());
    let waiting_prompt = format!("  {} ", style("... >").dim());
    let (mut chat_input, mut out) = ChatInput::new(idle_prompt.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let (reply_tx, mut reply_rx) = mpsc::channel::<TurnResult>(1);

    loop {
        tokio::select! {
            Some((turn, result)) = reply_rx.recv() => {
                let outcome = controller.complete_turn(turn, result).await;
                if let TurnOutcome::Failed { error } = &outcome {
                    debug!(error = %error, "Reply failed");
                }
                if let Some(message) = controller.log().last() {
                    write!(out, "{}", renderer.render_message(message))?;
                }
                chat_input.update_prompt(&idle_prompt);
            }

            event = chat_input.read_line() => {
                let flow = match event {
                    InputEvent::Eof => Flow::Exit,
                    InputEvent::Interrupted => {
                        writeln!(out, "  {}", style("Press Ctrl+D to exit, or keep chatting.").dim())?;
                        Flow::Continue
                    }
                    InputEvent::Line(line) => match commands::parse(&line) {
                        Some(cmd) => {
                            handle_command(cmd, state, &mut controller, &mut chat_input, &renderer, &mut out)
                                .await?
                        }
                        None => {
                            submit_line(line, &mut controller, &reply_tx, &mut out)?;
                            if controller.is_pending() {
                                chat_input.update_prompt(&waiting_prompt);
                            }
                            Flow::Continue
                        }
                    },
                };

                if flow == Flow::Exit {
                    break;
                }
            }
        }
    }

    if controller.is_pending() {
        info!("Chat ended with a reply outstanding; it will not be saved");
        writeln!(out, "  {}", style("Pending reply discarded.").yellow())?;
    }
    writeln!(out, "  {}", style("Session ended.").dim())?;
    chat_input.finish();
    Ok(())
}

/// Start a turn for `line` and send its request on a background task.
fn submit_line(
    line: String,
    controller: &mut ConcreteController,
    reply_tx: &mpsc::Sender<TurnResult>,
    out: &mut SharedWriter,
) -> anyhow::Result<()> {
    controller.set_draft(line);
    match controller.begin_turn() {
        Ok(Some(turn)) => {
            let backend = Arc::clone(controller.backend());
            let tx = reply_tx.clone();
            tokio::spawn(async move {
                let result = turn.send(backend.as_ref()).await;
                // The receiver is gone only when the loop has exited.
                let _ = tx.send((turn, result)).await;
            });
        }
        Ok(None) => {}
        Err(SessionError::Busy) => {
            writeln!(
                out,
                "  {} Still waiting for the last reply. Try again once it arrives.",
                style("~").yellow().bold()
            )?;
        }
    }
    Ok(())
}

async fn handle_command(
    cmd: ChatCommand,
    state: &AppState,
    controller: &mut ConcreteController,
    chat_input: &mut ChatInput,
    renderer: &ChatRenderer,
    out: &mut SharedWriter,
) -> anyhow::Result<Flow> {
    match cmd {
        ChatCommand::Help => {
            write!(out, "{}", commands::help_text())?;
        }
        ChatCommand::Clear => match controller.clear().await {
            Ok(()) => writeln!(out, "\n  {} Conversation cleared.\n", style("ok").green())?,
            Err(e) => writeln!(
                out,
                "\n  {} Conversation cleared here, but the saved copy could not be deleted: {e}\n",
                style("!").red().bold()
            )?,
        },
        ChatCommand::Cls => chat_input.clear(),
        ChatCommand::History => {
            if controller.log().is_empty() {
                writeln!(out, "\n  {}\n", style("No messages yet.").dim())?;
            } else {
                writeln!(out)?;
                write!(out, "{}", renderer.render_log(controller.log()))?;
                writeln!(out)?;
            }
        }
        ChatCommand::Status => {
            writeln!(out)?;
            writeln!(out, "  Phase:    {}", style(controller.phase()).bold())?;
            writeln!(out, "  Messages: {}", controller.log().len())?;
            writeln!(out, "  Endpoint: {}", style(&state.config.endpoint).dim())?;
            writeln!(out, "  Requests: {}", style(state.config.request_shape).dim())?;
            writeln!(out)?;
        }
        ChatCommand::Exit => return Ok(Flow::Exit),
        ChatCommand::Unknown(name) => {
            writeln!(
                out,
                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                style("?").yellow().bold(),
                style(name).dim()
            )?;
        }
    }
    Ok(Flow::Continue)
}
