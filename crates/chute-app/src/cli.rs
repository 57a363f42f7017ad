//! Command-line interface for the ingestion service.

use std::path::PathBuf;

use chute_config::{DEFAULT_MAX_FILE_SIZE, IngestSettings};
use clap::{Parser, Subcommand};

use crate::telemetry::DEFAULT_LOG_LEVEL;

/// Top-level CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "chute", version, about = "Staged-file ingestion service")]
pub struct Cli {
    /// Root of the data layout holding `incoming/`, `processed/`,
    /// `rejected/`, and the metadata document.
    #[arg(long, env = "CHUTE_DATA_ROOT", default_value = "data")]
    pub data_root: PathBuf,

    /// Maximum accepted file size in bytes.
    #[arg(long, env = "CHUTE_MAX_FILE_SIZE", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: u64,

    /// Default log level when `RUST_LOG` is not set.
    #[arg(long, env = "CHUTE_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Drain the staging directory once, best effort.
    Run,
    /// Print the current metadata records as JSON.
    List,
}

impl Cli {
    /// Derive pipeline settings from the parsed arguments.
    #[must_use]
    pub fn settings(&self) -> IngestSettings {
        IngestSettings::with_data_root(&self.data_root).max_file_size(self.max_file_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_only_a_command_is_given() {
        let cli = Cli::try_parse_from(["chute", "run"]).expect("parse");
        assert_eq!(cli.data_root, PathBuf::from("data"));
        assert_eq!(cli.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(cli.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(cli.command, Command::Run);
    }

    #[test]
    fn flags_override_the_layout_and_size_cap() {
        let cli = Cli::try_parse_from([
            "chute",
            "--data-root",
            "/srv/chute",
            "--max-file-size",
            "1024",
            "list",
        ])
        .expect("parse");
        assert_eq!(cli.command, Command::List);

        let settings = cli.settings();
        assert_eq!(settings.incoming_dir, PathBuf::from("/srv/chute/incoming"));
        assert_eq!(settings.max_file_size, 1024);
    }

    #[test]
    fn a_command_is_required() {
        assert!(Cli::try_parse_from(["chute"]).is_err());
    }
}
