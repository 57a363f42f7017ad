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

//! Binary entrypoint for the chute ingestion service.

use chute_app::{AppResult, run_app};

/// Parses the CLI and runs the requested command.
fn main() -> AppResult<()> {
    run_app()
}
