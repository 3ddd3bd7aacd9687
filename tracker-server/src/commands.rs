//! Maintenance subcommands that work directly on the tracking database.

use anyhow::{Context, Result};
use storage::{TrackedMessage, TrackingRepository, TrackingStats, TrackingStore};

use crate::config::ServerConfig;

const SUBJECT_PREVIEW_LEN: usize = 40;

/// Initializes console-only tracing for one-shot commands.
fn init_console_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        .with_target(false)
        .try_init();
}

async fn open_store(config: &ServerConfig) -> Result<TrackingRepository> {
    TrackingRepository::new(&config.database_url)
        .await
        .with_context(|| format!("Open tracking database (DATABASE_URL={})", config.database_url))
}

/// Handle the list command: print recent messages and the stats line.
pub async fn handle_list(config: ServerConfig, limit: u32) -> Result<()> {
    init_console_tracing();
    let repo = open_store(&config).await?;
    let messages = repo
        .list_recent(limit)
        .await
        .context("Query recent tracked messages")?;
    print!("{}", render_listing(&messages));
    Ok(())
}

/// Handle the purge-self-opens command.
pub async fn handle_purge_self_opens(config: ServerConfig, tracking_id: &str) -> Result<()> {
    init_console_tracing();
    let repo = open_store(&config).await?;
    let outcome = repo
        .remove_self_opens(tracking_id)
        .await
        .with_context(|| format!("Remove self-opens for {}", tracking_id))?;
    println!(
        "Removed {} self-open(s); {} open(s) remain.",
        outcome.removed, outcome.remaining
    );
    Ok(())
}

/// Formats messages as a fixed-width table followed by a stats line.
pub fn render_listing(messages: &[TrackedMessage]) -> String {
    if messages.is_empty() {
        return "No tracked messages.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<32} {:<20} {:<6} {:<6} {:<28} {}\n",
        "tracking_id", "sent_at", "opens", "self", "recipient", "subject"
    ));
    out.push_str(&"-".repeat(120));
    out.push('\n');

    for m in messages {
        let self_opens = m.opens.iter().filter(|e| e.is_self).count();
        let subject: String = m.subject.chars().take(SUBJECT_PREVIEW_LEN).collect();
        out.push_str(&format!(
            "{:<32} {:<20} {:<6} {:<6} {:<28} {}\n",
            m.tracking_id,
            m.sent_at.format("%Y-%m-%d %H:%M:%S"),
            m.open_count() - self_opens,
            self_opens,
            m.recipient,
            subject.replace('\n', " ")
        ));
    }

    let stats = TrackingStats::from_messages(messages);
    out.push_str(&format!(
        "\nTotal: {}, Opened: {}, Unopened: {}, Opens: {}, Open rate: {}%\n",
        stats.total_emails,
        stats.opened_emails,
        stats.unopened_emails,
        stats.total_opens,
        stats.open_rate
    ));
    out
}
