//! Structured logging setup.
//!
//! Installs a global `tracing` subscriber: an `EnvFilter` (honouring
//! `RUST_LOG` first) plus either JSON lines or human-readable output.

use crate::config::LogSettings;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging initialization errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive did not parse.
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber is already installed.
    #[error("Subscriber init failed: {0}")]
    SubscriberInit(String),
}

/// Install the global subscriber described by `settings`.
///
/// Fails if a subscriber is already installed; callers that may race
/// (tests) can ignore the error.
pub fn init_logging(settings: &LogSettings) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| TelemetryError::InvalidFilter(e.to_string()))?;

    if settings.json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;
    }

    tracing::info!(
        level = %settings.level,
        json = settings.json,
        "[rmn-remote] Logging initialized"
    );
    Ok(())
}
