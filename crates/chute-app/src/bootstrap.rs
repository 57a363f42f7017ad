//! Command dispatch for the binary entrypoint.

use chute_config::IngestSettings;
use chute_ingest::IngestService;
use chute_store::MetadataStore;
use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Command};
use crate::error::{AppError, AppResult};
use crate::telemetry;

/// Parse arguments, install logging, and run the requested command.
///
/// # Errors
///
/// Returns an error if logging cannot be installed, the settings are
/// invalid, or the command itself fails.
pub fn run_app() -> AppResult<()> {
    let cli = Cli::parse();
    telemetry::init_logging(&cli.log_level)
        .map_err(|source| AppError::telemetry("telemetry.init", source))?;
    execute(&cli)
}

/// Run the requested command against validated settings.
///
/// Split from [`run_app`] so tests can drive commands without touching the
/// process-global logger or real argv.
///
/// # Errors
///
/// Returns an error when settings validation or the command fails.
pub fn execute(cli: &Cli) -> AppResult<()> {
    let settings = cli.settings();
    settings
        .validate()
        .map_err(|source| AppError::config("settings.validate", source))?;

    match cli.command {
        Command::Run => run_batch(settings),
        Command::List => list_records(&settings),
    }
}

fn run_batch(settings: IngestSettings) -> AppResult<()> {
    let store = MetadataStore::open(&settings.store_path)
        .map_err(|source| AppError::store("store.open", source))?;
    let service = IngestService::new(settings, store);

    let summary = service
        .run_once()
        .map_err(|source| AppError::ingest("batch.run_once", source))?;
    info!(
        scanned = summary.scanned,
        processed = summary.processed,
        rejected = summary.rejected,
        failed = summary.failed,
        "staging drain complete"
    );
    Ok(())
}

fn list_records(settings: &IngestSettings) -> AppResult<()> {
    let store = MetadataStore::open(&settings.store_path)
        .map_err(|source| AppError::store("store.open", source))?;
    let records = store.list_all();
    let rendered = serde_json::to_string_pretty(&records).map_err(|source| AppError::Render {
        operation: "records.render",
        source,
    })?;
    println!("{rendered}");
    Ok(())
}
