//! Persisted record types for the metadata log.

use serde::{Deserialize, Serialize};

/// Terminal status of one ingested file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// File passed validation and was moved to the processed directory.
    Processed,
    /// File failed validation and was moved to the rejected directory.
    Rejected,
}

impl FileStatus {
    /// Wire representation of the status, matching the persisted literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Rejected => "rejected",
        }
    }
}

/// Audit record appended once per relocated file, immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Base name of the ingested file, without any path component.
    pub filename: String,
    /// Byte count at the time of processing.
    pub size: u64,
    /// Lowercase hex SHA-256 digest of the full file contents.
    pub sha256: String,
    /// Terminal status after validation.
    pub status: FileStatus,
    /// Empty when processed; a stable rejection code otherwise.
    pub reason: String,
    /// Final location of the file after relocation.
    pub path: String,
}
