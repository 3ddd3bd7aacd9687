//! Tracing initialization: console and log file share the same full fmt format
//! (level, target, span, all fields).

use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::FmtSpan,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Filter used when `RUST_LOG` is unset: tracker crates at info, sqlx query
/// logging only on warnings.
pub const DEFAULT_LOG_FILTER: &str = "info,tracker_server=info,storage=info,sqlx=warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Initializes the global tracing subscriber.
///
/// Output is teed to stdout and to `log_file_path` (opened in append mode).
/// The level comes from `RUST_LOG` (e.g. `info`, `debug`, `tracker_server=trace`);
/// defaults to [`DEFAULT_LOG_FILTER`]. Load `.env` with `dotenvy` before calling, otherwise
/// `RUST_LOG` from the file is not seen.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    let file = Arc::new(file);

    use tracing_subscriber::fmt::writer::MakeWriterExt;
    let writer = io::stdout.and(file);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .with_file(false)
        .with_line_number(false);

    Registry::default()
        .with(env_filter())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER).expect("default filter is valid");
        let rendered = filter.to_string();
        assert!(rendered.contains("tracker_server=info"));
        assert!(rendered.contains("sqlx=warn"));
    }
}
