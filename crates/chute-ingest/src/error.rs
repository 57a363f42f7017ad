//! Error types for the ingestion pipeline.
//!
//! # Design
//! - Constant-message variants with structured context (operation tag plus
//!   the paths involved) so failures are reproducible in tests.
//! - Expected validation outcomes (too large, bad format) are not errors;
//!   only genuine IO, relocation, and store failures appear here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors produced by the ingestion pipeline.
#[derive(Debug, Error)]
pub enum IngestError {
    /// IO failures while reading or inspecting a staged file.
    #[error("ingest io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// Relocation of a staged file to its destination failed.
    ///
    /// The file may be left in an ambiguous location; no rollback of a
    /// partially copied destination is attempted.
    #[error("ingest relocation failure")]
    Relocate {
        /// Staging location of the file.
        from: PathBuf,
        /// Intended destination of the file.
        to: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A staged path had no usable file name component.
    #[error("ingest invalid source path")]
    InvalidSource {
        /// Static reason for the failure.
        reason: &'static str,
        /// Offending path.
        path: PathBuf,
    },
    /// Appending the metadata record failed after the file was relocated.
    #[error("ingest store failure")]
    Store {
        /// Base name of the file whose record could not be appended.
        filename: String,
        /// Underlying store error.
        source: chute_store::StoreError,
    },
}

impl IngestError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
