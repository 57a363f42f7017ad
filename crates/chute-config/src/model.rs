//! Settings model for the ingestion pipeline.
//!
//! # Design
//! - Settings are constructed explicitly at the edge (CLI flags or tests)
//!   and handed to the pipeline; nothing reads ambient global state.
//! - `validate` rejects layouts that would make the relocation contract
//!   ambiguous (overlapping directories) before any file is touched.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Default maximum accepted file size in bytes (5 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

const STORE_FILE_NAME: &str = "metadata.json";

/// Settings consumed by the ingestion pipeline at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSettings {
    /// Staging directory that callers drop new files into.
    pub incoming_dir: PathBuf,
    /// Destination directory for files that pass validation.
    pub processed_dir: PathBuf,
    /// Destination directory for files that fail validation.
    pub rejected_dir: PathBuf,
    /// Location of the metadata record log.
    pub store_path: PathBuf,
    /// Maximum accepted file size in bytes; larger files are rejected.
    pub max_file_size: u64,
}

impl IngestSettings {
    /// Derive the standard sibling layout under a single data root:
    /// `incoming/`, `processed/`, `rejected/` plus a colocated
    /// `metadata.json`.
    #[must_use]
    pub fn with_data_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            incoming_dir: root.join("incoming"),
            processed_dir: root.join("processed"),
            rejected_dir: root.join("rejected"),
            store_path: root.join(STORE_FILE_NAME),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Override the maximum accepted file size.
    #[must_use]
    pub const fn max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Check the settings for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when the size cap is zero or
    /// when the staging and destination directories are not pairwise
    /// distinct.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_file_size == 0 {
            return Err(ConfigError::InvalidField {
                field: "max_file_size",
                reason: "must_be_positive",
                value: Some(self.max_file_size.to_string()),
            });
        }

        let directories = [
            ("incoming_dir", &self.incoming_dir),
            ("processed_dir", &self.processed_dir),
            ("rejected_dir", &self.rejected_dir),
        ];
        for (index, (field, dir)) in directories.iter().copied().enumerate() {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidField {
                    field,
                    reason: "empty_path",
                    value: None,
                });
            }
            if directories[index + 1..].iter().any(|(_, other)| *other == dir) {
                return Err(ConfigError::InvalidField {
                    field,
                    reason: "duplicate_directory",
                    value: Some(dir.display().to_string()),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_root_layout_produces_sibling_directories() {
        let settings = IngestSettings::with_data_root("/srv/chute");
        assert_eq!(settings.incoming_dir, PathBuf::from("/srv/chute/incoming"));
        assert_eq!(
            settings.processed_dir,
            PathBuf::from("/srv/chute/processed")
        );
        assert_eq!(settings.rejected_dir, PathBuf::from("/srv/chute/rejected"));
        assert_eq!(
            settings.store_path,
            PathBuf::from("/srv/chute/metadata.json")
        );
        assert_eq!(settings.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn default_layout_validates() {
        let settings = IngestSettings::with_data_root("data");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn zero_size_cap_is_rejected() {
        let settings = IngestSettings::with_data_root("data").max_file_size(0);
        let err = settings.validate().expect_err("zero cap should fail");
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "max_file_size",
                reason: "must_be_positive",
                ..
            }
        ));
    }

    #[test]
    fn overlapping_directories_are_rejected() {
        let mut settings = IngestSettings::with_data_root("data");
        settings.rejected_dir.clone_from(&settings.processed_dir);
        let err = settings.validate().expect_err("overlap should fail");
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                reason: "duplicate_directory",
                ..
            }
        ));
    }
}
