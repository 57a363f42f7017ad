//! Error types for ingestion settings.

use thiserror::Error;

/// Primary error type for settings validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A settings field contained an invalid value.
    #[error("invalid ingest setting")]
    InvalidField {
        /// Field that failed validation.
        field: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
}

/// Convenience alias for settings results.
pub type ConfigResult<T> = Result<T, ConfigError>;
