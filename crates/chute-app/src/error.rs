//! # Design
//!
//! - Centralize application-level errors for bootstrap and dispatch.
//! - Keep error messages constant while carrying context fields for
//!   debugging.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Settings validation failed.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: chute_config::ConfigError,
    },
    /// Metadata store operations failed.
    #[error("store operation failed")]
    Store {
        /// Operation identifier.
        operation: &'static str,
        /// Source store error.
        source: chute_store::StoreError,
    },
    /// Ingestion pipeline operations failed.
    #[error("ingestion operation failed")]
    Ingest {
        /// Operation identifier.
        operation: &'static str,
        /// Source ingestion error.
        source: chute_ingest::IngestError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: crate::telemetry::TelemetryError,
    },
    /// Rendering records for output failed.
    #[error("output serialization failed")]
    Render {
        /// Operation identifier.
        operation: &'static str,
        /// Source JSON error.
        source: serde_json::Error,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: chute_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn store(operation: &'static str, source: chute_store::StoreError) -> Self {
        Self::Store { operation, source }
    }

    pub(crate) const fn ingest(operation: &'static str, source: chute_ingest::IngestError) -> Self {
        Self::Ingest { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: crate::telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }
}
