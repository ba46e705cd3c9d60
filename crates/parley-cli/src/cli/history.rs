//! Stored conversation commands: `parley history` and `parley clear`.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use parley_types::message::{ChatLog, Message, MessageKind};

use crate::state::AppState;

const PREVIEW_CHARS: usize = 80;

/// Print the stored conversation.
pub async fn show_history(state: &AppState, json: bool) -> Result<()> {
    let log = state.chat_log_store().load().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&log)?);
        return Ok(());
    }

    if log.is_empty() {
        println!();
        println!("  {} No stored conversation.", style("i").blue().bold());
        println!("     Start one with: parley chat");
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  Stored conversation ({} messages: {} from you, {} replies, {} errors)",
        log.len(),
        log.count(MessageKind::User),
        log.count(MessageKind::Bot),
        log.count(MessageKind::Error),
    );
    println!();
    println!("{}", history_table(&log));
    println!();

    Ok(())
}

fn history_table(log: &ChatLog) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("From").fg(Color::White),
        Cell::new("Message").fg(Color::White),
    ]);

    for (i, message) in log.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).fg(Color::DarkGrey),
            sender_cell(message),
            Cell::new(preview(&message.text)),
        ]);
    }

    table
}

fn sender_cell(message: &Message) -> Cell {
    match message.kind {
        MessageKind::User => Cell::new("you").fg(Color::Green),
        MessageKind::Bot => Cell::new("bot").fg(Color::Cyan),
        MessageKind::Error => Cell::new("error").fg(Color::Red),
    }
}

fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

/// Delete the stored conversation after confirmation.
pub async fn clear_history(state: &AppState, force: bool, json: bool) -> Result<()> {
    let history = state.chat_log_store();
    let count = history.load().await.len();

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete the stored conversation ({} messages)?",
                style(count).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    history
        .forget()
        .await
        .context("Failed to delete the stored conversation")?;

    if json {
        let result = serde_json::json!({
            "cleared": true,
            "messages": count,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        println!(
            "  {} Deleted the stored conversation ({} messages).",
            style("ok").green(),
            count
        );
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("hello"), "hello");
    }

    #[test]
    fn test_preview_flattens_and_truncates() {
        let long = format!("line one\n{}", "x".repeat(200));
        let p = preview(&long);
        assert!(!p.contains('\n'));
        assert_eq!(p.chars().count(), PREVIEW_CHARS);
        assert!(p.ends_with("..."));
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        let text = "é".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&text), text);
    }

    #[test]
    fn test_history_table_has_a_row_per_message() {
        let log = ChatLog::from(vec![
            Message::user("hello"),
            Message::bot("Hi! How can I help?"),
            Message::generic_error(),
        ]);
        let rendered = history_table(&log).to_string();
        assert!(rendered.contains("hello"));
        assert!(rendered.contains("error"));
        assert!(rendered.contains('3'));
    }
}
