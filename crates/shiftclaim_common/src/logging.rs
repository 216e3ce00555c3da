//! Logging utilities for the ShiftClaim watcher.
//!
//! Sets up the `tracing` subscriber used by every crate in the workspace:
//! an `EnvFilter` (so `RUST_LOG` still works), a console `fmt` layer and an
//! optional daily rotated log file.

use shiftclaim_config::LoggingConfig;
use std::str::FromStr;
use tracing::{error, info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix for rotated log files.
pub const LOG_FILE_PREFIX: &str = "shiftclaim.log";

/// Parses a level name, falling back to INFO for anything unrecognised.
pub fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

/// Initialize the tracing subscriber from the logging config.
///
/// The returned guard must be kept alive for the lifetime of the process when
/// file logging is enabled, otherwise buffered lines are lost on exit.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    init_with_level(parse_level(&config.level), config.directory.as_deref())
}

/// Initialize the tracing subscriber with a specific log level.
///
/// # Arguments
///
/// * `level` - The minimum level for the workspace crates.
/// * `directory` - Optional directory for a daily rotated log file.
pub fn init_with_level(level: Level, directory: Option<&str>) -> Option<WorkerGuard> {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("shiftclaim={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let console = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let (file_layer, guard) = match directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // try_init: a subscriber may already be installed (tests, repeated init)
    let result = tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
        if let Some(dir) = directory {
            info!("Also logging to {}/{}", dir, LOG_FILE_PREFIX);
        }
    }
    guard
}

/// Log an error with context at the ERROR level.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result, with different messages for success and error cases.
///
/// Returns the original result so the call can sit inside a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
