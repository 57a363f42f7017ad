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

//! Append-only metadata record log backed by a single JSON document.
//!
//! Layout: `model.rs` (persisted record types), `error.rs` (structured
//! store errors), `store.rs` (the [`MetadataStore`] itself).

pub mod error;
pub mod model;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use model::{FileRecord, FileStatus};
pub use store::MetadataStore;
