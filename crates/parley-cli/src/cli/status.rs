//! Status command: configuration, stored conversation and endpoint health.

use anyhow::Result;
use console::style;

use parley_core::backend::provider::ChatBackend;
use parley_infra::sqlite::kv::SqliteKvStore;
use parley_types::message::MessageKind;

use crate::state::AppState;

/// Display configuration, stored conversation size and endpoint health.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let log = state.chat_log_store().load().await;
    let entry = SqliteKvStore::new(state.db_pool.clone())
        .get_entry(&state.config.storage_key)
        .await?;
    let health = state.backend.health().await;
    let healthy = matches!(&health, Ok(h) if h.is_ok());

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "endpoint": state.config.endpoint,
            "chat_url": state.backend.chat_url(),
            "request_shape": state.config.request_shape,
            "storage_key": state.config.storage_key,
            "messages": {
                "total": log.len(),
                "user": log.count(MessageKind::User),
                "bot": log.count(MessageKind::Bot),
                "error": log.count(MessageKind::Error),
            },
            "saved_at": entry.as_ref().map(|e| e.updated_at.to_rfc3339()),
            "saved_bytes": entry.as_ref().map(|e| e.size_bytes()),
            "healthy": healthy,
            "health_error": health.as_ref().err().map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!("  {} Parley v{}", style("*").cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!();

    println!("  {}", style("── Endpoint ──").dim());
    println!("  Chat URL: {}", style(state.backend.chat_url()).cyan());
    println!("  Requests: {}", state.config.request_shape);
    match &health {
        Ok(h) if h.is_ok() => println!("  Health:   {}", style("ok").green()),
        Ok(h) => println!("  Health:   {}", style(&h.status).yellow()),
        Err(e) => println!("  Health:   {} ({e})", style("unreachable").red()),
    }
    println!();

    println!("  {}", style("── Conversation ──").dim());
    println!("  Messages: {}", style(log.len()).bold());
    if let Some(entry) = &entry {
        println!(
            "  Saved:    {} ({} bytes)",
            entry.updated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            entry.size_bytes()
        );
    }
    if !log.is_empty() {
        println!(
            "  From you: {}  Replies: {}  Errors: {}",
            log.count(MessageKind::User),
            log.count(MessageKind::Bot),
            log.count(MessageKind::Error),
        );
    }
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!("  Key:      {}", style(&state.config.storage_key).dim());
    println!();

    Ok(())
}
