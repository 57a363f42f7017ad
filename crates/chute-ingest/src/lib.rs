#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Validation, hashing, and relocation pipeline for staged files.
//!
//! Layout: `hash.rs` (content digests), `sniff.rs` (delimited-text format
//! sniffing), `validate.rs` (the ordered pass/fail decision), `service.rs`
//! (per-file pipeline and batch drain).

pub mod error;
pub mod hash;
pub mod service;
pub mod sniff;
pub mod validate;

pub use error::{IngestError, IngestResult};
pub use service::{BatchSummary, IngestService};
pub use sniff::{SniffOutcome, SniffRejection, TableShape};
pub use validate::{
    FileValidator, REASON_BAD_FORMAT, REASON_NOT_FOUND, REASON_OK, REASON_TOO_LARGE,
    ValidationResult,
};
