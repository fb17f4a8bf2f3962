//! Logging Infrastructure
//!
//! Installs a `tracing` subscriber for applications embedding the client.
//! Libraries only emit events; call this once from `main`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logging system
///
/// `RUST_LOG` overrides `level` when set.
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "club_client=trace")
/// * `json_format` - JSON lines instead of human readable output
///
/// # Examples
/// ```no_run
/// club_client::logger::init_logger("debug", false).unwrap();
/// ```
pub fn init_logger(level: &str, json_format: bool) -> Result<(), LoggerError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| LoggerError::InvalidFilter(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_thread_ids(false))
            .try_init()
    };

    result.map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}

/// Logger setup failure
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),
    #[error("global subscriber already set: {0}")]
    AlreadyInitialized(String),
}
