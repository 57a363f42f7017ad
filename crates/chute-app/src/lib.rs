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

//! Binary wiring for the chute ingestion service.
//!
//! Layout: `cli.rs` (argument parsing), `telemetry.rs` (logging bootstrap),
//! `bootstrap.rs` (command dispatch).

pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod telemetry;

pub use bootstrap::run_app;
pub use error::{AppError, AppResult};
