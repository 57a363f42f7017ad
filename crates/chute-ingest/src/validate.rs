//! Ordered validation checks for staged files.
//!
//! The check order is a contract: existence, then size, then format, so
//! oversized files are rejected before the comparatively expensive sniff.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{IngestError, IngestResult};
use crate::sniff;

/// Reason reported for a file that passed every check.
pub const REASON_OK: &str = "ok";
/// Reason reported when the file is absent at validation time.
pub const REASON_NOT_FOUND: &str = "file not found";
/// Reason reported when the file exceeds the configured size cap.
pub const REASON_TOO_LARGE: &str = "file is too large";
/// Reason reported when the format sniffer rejects the file.
pub const REASON_BAD_FORMAT: &str = "invalid file format: (file is not of CSV format)";

/// Transient pass/fail decision consumed immediately by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the file passed every check.
    pub ok: bool,
    /// Stable reason code; [`REASON_OK`] when the file passed.
    pub reason: &'static str,
}

impl ValidationResult {
    const fn passed() -> Self {
        Self {
            ok: true,
            reason: REASON_OK,
        }
    }

    const fn rejected(reason: &'static str) -> Self {
        Self { ok: false, reason }
    }
}

/// Composes existence, size, and format checks into one decision.
#[derive(Debug, Clone, Copy)]
pub struct FileValidator {
    max_file_size: u64,
}

impl FileValidator {
    /// Build a validator enforcing the given size cap in bytes.
    #[must_use]
    pub const fn new(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Validate the file at `path`, short-circuiting on the first failure.
    ///
    /// Expected rejections (absent, oversized, non-tabular) come back as an
    /// `Ok` result carrying the reason code.
    ///
    /// # Errors
    ///
    /// Returns an error only for unexpected IO failures while inspecting the
    /// file; those are not validation verdicts and must propagate.
    pub fn validate(&self, path: &Path) -> IngestResult<ValidationResult> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Ok(ValidationResult::rejected(REASON_NOT_FOUND));
            }
            Err(source) => return Err(IngestError::io("validate.stat", path, source)),
        };
        if metadata.len() > self.max_file_size {
            return Ok(ValidationResult::rejected(REASON_TOO_LARGE));
        }
        if !sniff::sniff(path).is_tabular() {
            return Ok(ValidationResult::rejected(REASON_BAD_FORMAT));
        }
        Ok(ValidationResult::passed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(temp: &TempDir, name: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = temp.path().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    #[test]
    fn missing_file_is_not_found() -> Result<()> {
        let temp = TempDir::new()?;
        let validator = FileValidator::new(1024);

        let result = validator.validate(&temp.path().join("absent.csv"))?;
        assert!(!result.ok);
        assert_eq!(result.reason, REASON_NOT_FOUND);
        Ok(())
    }

    #[test]
    fn oversized_file_is_rejected_before_the_sniff() -> Result<()> {
        let temp = TempDir::new()?;
        // Structurally valid CSV; the size cap must still win.
        let path = write_file(&temp, "big.csv", b"col1,col2\n1,2\n3,4\n")?;
        let validator = FileValidator::new(8);

        let result = validator.validate(&path)?;
        assert!(!result.ok);
        assert_eq!(result.reason, REASON_TOO_LARGE);
        Ok(())
    }

    #[test]
    fn file_at_exactly_the_cap_is_not_too_large() -> Result<()> {
        let temp = TempDir::new()?;
        let contents = b"col1,col2\n1,2\n";
        let path = write_file(&temp, "exact.csv", contents)?;
        let validator = FileValidator::new(contents.len() as u64);

        let result = validator.validate(&path)?;
        assert!(result.ok);
        assert_eq!(result.reason, REASON_OK);
        Ok(())
    }

    #[test]
    fn consistent_delimited_text_is_ok() -> Result<()> {
        let temp = TempDir::new()?;
        let path = write_file(&temp, "valid.csv", b"col1,col2\n1,2\n")?;
        let validator = FileValidator::new(1024);

        assert_eq!(
            validator.validate(&path)?,
            ValidationResult {
                ok: true,
                reason: REASON_OK
            }
        );
        Ok(())
    }

    #[test]
    fn empty_and_undelimited_files_are_bad_format() -> Result<()> {
        let temp = TempDir::new()?;
        let validator = FileValidator::new(1024);

        for (name, contents) in [
            ("empty.csv", b"".as_slice()),
            ("plain.txt", b"invalid".as_slice()),
        ] {
            let path = write_file(&temp, name, contents)?;
            let result = validator.validate(&path)?;
            assert!(!result.ok, "{name} should fail validation");
            assert_eq!(result.reason, REASON_BAD_FORMAT, "reason for {name}");
        }
        Ok(())
    }
}
