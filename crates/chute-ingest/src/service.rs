//! Per-file ingestion pipeline and batch drain.
//!
//! # Design
//! - One file runs validate → hash → relocate → record to completion before
//!   the next file starts; the store append happens only after the move
//!   succeeds, so a record always implies the file already left staging.
//! - Rejected files are still hashed so they stay fingerprinted for audit.
//! - A per-file failure is logged and leaves the file in staging; it never
//!   aborts the rest of the batch.

use std::fs;
use std::path::{Path, PathBuf};

use chute_config::IngestSettings;
use chute_store::{FileRecord, FileStatus, MetadataStore};
use tracing::{error, info};

use crate::error::{IngestError, IngestResult};
use crate::hash;
use crate::validate::FileValidator;

/// Outcome counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Regular files found in staging when the batch started.
    pub scanned: usize,
    /// Files relocated to the processed directory.
    pub processed: usize,
    /// Files relocated to the rejected directory.
    pub rejected: usize,
    /// Files left in staging after an ingestion failure.
    pub failed: usize,
}

/// Orchestrates validation, hashing, relocation, and record append.
#[derive(Debug)]
pub struct IngestService {
    settings: IngestSettings,
    validator: FileValidator,
    store: MetadataStore,
}

impl IngestService {
    /// Build a service over explicit settings and an opened store.
    #[must_use]
    pub const fn new(settings: IngestSettings, store: MetadataStore) -> Self {
        let validator = FileValidator::new(settings.max_file_size);
        Self {
            settings,
            validator,
            store,
        }
    }

    /// The record log backing this service.
    #[must_use]
    pub const fn store(&self) -> &MetadataStore {
        &self.store
    }

    /// Drain the staging directory once, best effort.
    ///
    /// The set of files is snapshotted up front; files added mid-run are
    /// picked up by the next batch. Per-file failures are logged and
    /// counted, and the affected file stays in staging.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory layout cannot be created or the
    /// staging directory cannot be enumerated.
    pub fn run_once(&self) -> IngestResult<BatchSummary> {
        self.ensure_layout()?;

        let staged = self.snapshot_staging()?;
        let mut summary = BatchSummary {
            scanned: staged.len(),
            ..BatchSummary::default()
        };
        for path in staged {
            match self.process_file(&path) {
                Ok(record) => {
                    info!(
                        filename = %record.filename,
                        status = record.status.as_str(),
                        reason = %record.reason,
                        "file ingested"
                    );
                    match record.status {
                        FileStatus::Processed => summary.processed += 1,
                        FileStatus::Rejected => summary.rejected += 1,
                    }
                }
                Err(err) => {
                    error!(
                        path = %path.display(),
                        error = %err,
                        "failed to ingest staged file; leaving it in place"
                    );
                    summary.failed += 1;
                }
            }
        }
        Ok(summary)
    }

    /// Run the full pipeline for one staged file.
    ///
    /// The hash is computed unconditionally, before any relocation, so a
    /// read failure propagates while the file is still in staging and
    /// rejected files are fingerprinted all the same.
    ///
    /// # Errors
    ///
    /// Returns an error on IO failures while reading or hashing, on a
    /// failed relocation, or when the record cannot be appended after the
    /// move.
    pub fn process_file(&self, path: &Path) -> IngestResult<FileRecord> {
        let verdict = self.validator.validate(path)?;
        let sha256 = hash::sha256_hex(path)?;
        let size = fs::metadata(path)
            .map_err(|source| IngestError::io("ingest.stat", path, source))?
            .len();
        let file_name = path
            .file_name()
            .ok_or_else(|| IngestError::InvalidSource {
                reason: "missing_file_name",
                path: path.to_path_buf(),
            })?;

        let destination_dir = if verdict.ok {
            &self.settings.processed_dir
        } else {
            &self.settings.rejected_dir
        };
        let destination = destination_dir.join(file_name);
        relocate(path, &destination)?;

        let record = FileRecord {
            filename: file_name.to_string_lossy().into_owned(),
            size,
            sha256,
            status: if verdict.ok {
                FileStatus::Processed
            } else {
                FileStatus::Rejected
            },
            reason: if verdict.ok {
                String::new()
            } else {
                verdict.reason.to_string()
            },
            path: destination.display().to_string(),
        };
        self.store
            .append(record.clone())
            .map_err(|source| IngestError::Store {
                filename: record.filename.clone(),
                source,
            })?;
        Ok(record)
    }

    fn ensure_layout(&self) -> IngestResult<()> {
        for dir in [
            &self.settings.incoming_dir,
            &self.settings.processed_dir,
            &self.settings.rejected_dir,
        ] {
            fs::create_dir_all(dir).map_err(|source| IngestError::io("layout.create", dir, source))?;
        }
        Ok(())
    }

    fn snapshot_staging(&self) -> IngestResult<Vec<PathBuf>> {
        let incoming = &self.settings.incoming_dir;
        let entries = fs::read_dir(incoming)
            .map_err(|source| IngestError::io("staging.scan", incoming, source))?;

        let mut staged = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|source| IngestError::io("staging.scan_entry", incoming, source))?;
            let file_type = entry
                .file_type()
                .map_err(|source| IngestError::io("staging.file_type", entry.path(), source))?;
            if file_type.is_file() {
                staged.push(entry.path());
            }
        }
        // read_dir order is platform-dependent; sort for stable batch logs.
        staged.sort();
        Ok(staged)
    }
}

fn relocate(source: &Path, destination: &Path) -> IngestResult<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(_rename_err) => {
            // Rename cannot cross filesystems; fall back to copy + remove.
            fs::copy(source, destination).map_err(|source_err| IngestError::Relocate {
                from: source.to_path_buf(),
                to: destination.to_path_buf(),
                source: source_err,
            })?;
            fs::remove_file(source).map_err(|source_err| IngestError::Relocate {
                from: source.to_path_buf(),
                to: destination.to_path_buf(),
                source: source_err,
            })?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::REASON_BAD_FORMAT;
    use anyhow::Result;
    use tempfile::TempDir;

    fn service_over(temp: &TempDir) -> Result<IngestService> {
        let settings = IngestSettings::with_data_root(temp.path().join("data"));
        let store = MetadataStore::open(&settings.store_path)?;
        Ok(IngestService::new(settings, store))
    }

    fn stage_file(service: &IngestService, name: &str, contents: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&service.settings.incoming_dir)?;
        let path = service.settings.incoming_dir.join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    #[test]
    fn valid_file_is_processed_and_recorded() -> Result<()> {
        let temp = TempDir::new()?;
        let service = service_over(&temp)?;
        let staged = stage_file(&service, "valid.csv", b"col1,col2\n1,2\n")?;

        let summary = service.run_once()?;
        assert_eq!(summary.scanned, 1);
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.rejected, 0);
        assert_eq!(summary.failed, 0);

        assert!(!staged.exists(), "file should leave staging");
        let destination = service.settings.processed_dir.join("valid.csv");
        assert_eq!(fs::read_to_string(&destination)?, "col1,col2\n1,2\n");

        let records = service.store().list_all();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.filename, "valid.csv");
        assert_eq!(record.status, FileStatus::Processed);
        assert_eq!(record.reason, "");
        assert_eq!(record.size, 14);
        assert_eq!(record.sha256.len(), 64);
        assert_eq!(record.path, destination.display().to_string());
        Ok(())
    }

    #[test]
    fn invalid_file_is_rejected_but_still_fingerprinted() -> Result<()> {
        let temp = TempDir::new()?;
        let service = service_over(&temp)?;
        let staged = stage_file(&service, "bad_file.txt", b"invalid")?;

        let summary = service.run_once()?;
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.processed, 0);

        assert!(!staged.exists(), "file should leave staging");
        let destination = service.settings.rejected_dir.join("bad_file.txt");
        assert!(destination.is_file());

        let records = service.store().list_all();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.status, FileStatus::Rejected);
        assert_eq!(record.reason, REASON_BAD_FORMAT);
        assert_eq!(record.sha256, hash::sha256_hex(&destination)?);
        Ok(())
    }

    #[test]
    fn batch_routes_mixed_files_independently() -> Result<()> {
        let temp = TempDir::new()?;
        let service = service_over(&temp)?;
        stage_file(&service, "good.csv", b"a,b\n1,2\n")?;
        stage_file(&service, "noise.txt", b"not a table")?;

        let summary = service.run_once()?;
        assert_eq!(summary.scanned, 2);
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.failed, 0);

        let records = service.store().list_all();
        assert_eq!(records.len(), 2);
        // Batch order is name order.
        assert_eq!(records[0].filename, "good.csv");
        assert_eq!(records[1].filename, "noise.txt");
        Ok(())
    }

    #[test]
    fn non_files_in_staging_are_skipped() -> Result<()> {
        let temp = TempDir::new()?;
        let service = service_over(&temp)?;
        stage_file(&service, "only.csv", b"a,b\n1,2\n")?;
        fs::create_dir_all(service.settings.incoming_dir.join("subdir"))?;

        let summary = service.run_once()?;
        assert_eq!(summary.scanned, 1);
        assert_eq!(summary.processed, 1);
        assert!(service.settings.incoming_dir.join("subdir").is_dir());
        Ok(())
    }

    #[test]
    fn relocation_failure_leaves_file_staged_and_unrecorded() -> Result<()> {
        let temp = TempDir::new()?;
        let service = service_over(&temp)?;
        let staged = stage_file(&service, "valid.csv", b"col1,col2\n1,2\n")?;
        // Occupy the destination with a directory so the move cannot land.
        fs::create_dir_all(service.settings.processed_dir.join("valid.csv"))?;

        let summary = service.run_once()?;
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.processed, 0);
        assert!(staged.exists(), "file must stay in staging after a failed move");
        assert!(
            service.store().list_all().is_empty(),
            "no record may be appended for a file that did not move"
        );
        Ok(())
    }

    #[test]
    fn one_failure_does_not_abort_the_batch() -> Result<()> {
        let temp = TempDir::new()?;
        let service = service_over(&temp)?;
        stage_file(&service, "blocked.csv", b"col1,col2\n1,2\n")?;
        stage_file(&service, "fine.csv", b"col1,col2\n3,4\n")?;
        fs::create_dir_all(service.settings.processed_dir.join("blocked.csv"))?;

        let summary = service.run_once()?;
        assert_eq!(summary.scanned, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.processed, 1);

        let records = service.store().list_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].filename, "fine.csv");
        Ok(())
    }

    #[test]
    fn second_run_picks_up_newly_staged_files() -> Result<()> {
        let temp = TempDir::new()?;
        let service = service_over(&temp)?;
        stage_file(&service, "first.csv", b"a,b\n1,2\n")?;
        service.run_once()?;

        stage_file(&service, "second.csv", b"a,b\n3,4\n")?;
        let summary = service.run_once()?;
        assert_eq!(summary.scanned, 1);
        assert_eq!(summary.processed, 1);
        assert_eq!(service.store().list_all().len(), 2);
        Ok(())
    }

    #[test]
    fn empty_staging_directory_yields_an_empty_summary() -> Result<()> {
        let temp = TempDir::new()?;
        let service = service_over(&temp)?;

        let summary = service.run_once()?;
        assert_eq!(summary, BatchSummary::default());
        assert!(service.settings.incoming_dir.is_dir());
        assert!(service.settings.processed_dir.is_dir());
        assert!(service.settings.rejected_dir.is_dir());
        Ok(())
    }
}
