//! Logging bootstrap for the binary.
//!
//! `RUST_LOG` wins when set; otherwise the configured default level applies.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default logging level when neither `RUST_LOG` nor a flag is provided.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors produced while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Another subscriber was already installed globally.
    #[error("failed to install tracing subscriber")]
    InitFailed {
        /// Underlying initialisation error.
        source: tracing_subscriber::util::TryInitError,
    },
}

/// Configure and install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_logging(level: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .try_init()
        .map_err(|source| TelemetryError::InitFailed { source })
}

fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}
