//! Durable append-only record log.
//!
//! # Design
//! - One JSON array document, rewritten in full on every append.
//! - An in-process mutex serializes writers; the deployment assumption is a
//!   single process owning a single store instance.
//! - The read path absorbs a missing or unparsable document into an empty
//!   sequence, making the store self-healing after external corruption at
//!   the cost of discarding the unreadable history. Write failures always
//!   propagate; no partial record is considered committed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tracing::{error, warn};

use crate::error::{StoreError, StoreResult};
use crate::model::FileRecord;

/// Thread-safe append-only log of [`FileRecord`] entries.
#[derive(Debug)]
pub struct MetadataStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl MetadataStore {
    /// Open the store at `path`, creating missing parent directories and an
    /// empty document on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directories or the initial empty
    /// document cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|source| StoreError::io("store.create_parent", parent, source))?;
        }

        let store = Self {
            path,
            write_lock: Mutex::new(()),
        };
        if !store.path.exists() {
            store.write_records(&[])?;
        }
        Ok(store)
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record to the log.
    ///
    /// The critical section re-reads the current sequence, appends, and
    /// rewrites the full document, so records are committed in append order.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated document cannot be serialized or
    /// written; the record is not committed in that case.
    pub fn append(&self, record: FileRecord) -> StoreResult<()> {
        let _guard = self.lock_writer();
        let mut records = self.read_records_or_empty();
        records.push(record);
        self.write_records(&records)
    }

    /// Return all records in append order.
    ///
    /// Reads do not take the write lock; a missing or unparsable document
    /// yields an empty sequence rather than an error.
    #[must_use]
    pub fn list_all(&self) -> Vec<FileRecord> {
        self.read_records_or_empty()
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        match self.write_lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                error!("store write mutex poisoned; continuing with recovered guard");
                poisoned.into_inner()
            }
        }
    }

    fn read_records_or_empty(&self) -> Vec<FileRecord> {
        match self.read_records() {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "metadata document unreadable; treating it as empty"
                );
                Vec::new()
            }
        }
    }

    fn read_records(&self) -> StoreResult<Vec<FileRecord>> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|source| StoreError::io("records.read", &self.path, source))?;
        serde_json::from_str(&raw)
            .map_err(|source| StoreError::json("records.parse", &self.path, source))
    }

    fn write_records(&self, records: &[FileRecord]) -> StoreResult<()> {
        let serialised = serde_json::to_string_pretty(records)
            .map_err(|source| StoreError::json("records.serialize", &self.path, source))?;
        fs::write(&self.path, serialised)
            .map_err(|source| StoreError::io("records.write", &self.path, source))
    }
}
