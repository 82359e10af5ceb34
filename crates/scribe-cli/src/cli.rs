use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI surface definition. One store, two verbs, plus housekeeping.
#[derive(Parser, Debug)]
#[command(
    name = "scribe",
    about = "Append-only NDJSON record store with read-side redaction",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Optional subcommand; defaults to reading the store when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append one record, given as FIELD=VALUE pairs.
    Append {
        /// Backing NDJSON file; falls back to config, then the default data path.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Record fields. Values that parse as JSON are stored typed,
        /// everything else as a string.
        #[arg(required = true, value_name = "FIELD=VALUE")]
        fields: Vec<String>,
    },
    /// Print every stored record, sensitive fields removed.
    Read {
        /// Backing NDJSON file; falls back to config, then the default data path.
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Run a storage round-trip probe against a temporary file.
    Health,
    /// Print version and exit.
    Version,
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
}
