//! Logging Infrastructure
//!
//! Structured logging setup for development and production:
//! - console layer, plain or JSON format
//! - optional daily rotating file logs

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system.
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - JSON output (true for production, false for development)
/// * `log_dir` - Optional directory for daily rotating file logs
///
/// Returns the file-appender guard; keep it alive for the process lifetime
/// or buffered log lines are lost.
pub fn init_logger(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let mut file_guard = None;
    let file_layer = match log_dir {
        Some(dir) => {
            let dir = Path::new(dir);
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "front-desk.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            file_guard = Some(guard);
            Some(fmt::layer().with_writer(writer).with_ansi(false))
        }
        None => None,
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }

    Ok(file_guard)
}
