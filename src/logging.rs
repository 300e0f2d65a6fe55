//! Tracing subscriber wiring for the console.
//!
//! The long-running `start` loop logs to a daily-rotated JSON file plus
//! stderr ([`init_production`]); one-shot subcommands log to stderr only
//! ([`init_cli`]). The configured level is the default; `RUST_LOG` wins
//! when set.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the rotated-file writer flushing in the background.
///
/// Hold this for the life of the process; dropping it flushes what is
/// queued and closes the log file.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Set up file-plus-stderr logging for the watch loop.
///
/// JSON records land in `{logs_dir}/vizier-console.log.YYYY-MM-DD`, rotated
/// daily; stderr gets the human-readable layer. Filtering starts at
/// `default_level` unless `RUST_LOG` is set.
///
/// The returned [`LoggingGuard`] must outlive the loop or buffered records
/// are lost.
///
/// # Errors
///
/// Returns an error if the logs directory cannot be created.
pub fn init_production(logs_dir: &Path, default_level: &str) -> anyhow::Result<LoggingGuard> {
    std::fs::create_dir_all(logs_dir).map_err(|e| {
        anyhow::anyhow!(
            "failed to create logs directory {}: {e}",
            logs_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, "vizier-console.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking);

    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(console_layer)
        .init();

    Ok(LoggingGuard { _guard: guard })
}

/// Set up stderr-only logging for one-shot subcommands.
///
/// No file layer, no rotation. Filtering starts at `default_level` unless
/// `RUST_LOG` is set.
pub fn init_cli(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
