//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Banner Sync - Cross-region banner reconciliation pipeline
#[derive(Parser, Debug)]
#[command(
    name = "banner-sync",
    author,
    version,
    about = "Cross-region banner reconciliation and prediction",
    long_about = "Reconciles the two regional banner tables into a single timeline.\n\n\
                  Fetches both regions' banner lists, pairs up equivalent banners, \n\
                  predicts not-yet-announced Global dates from the learned regional \n\
                  delay, and serves substring queries over the result."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "BANNER_SYNC_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "BANNER_SYNC_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one load cycle and print the reconciled timeline
    Run(RunArgs),

    /// Validate configuration file without fetching
    Validate(ValidateArgs),

    /// Display resolved configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "config.toml", env = "BANNER_SYNC_CONFIG")]
    pub config: PathBuf,

    /// Substring query to filter the timeline (unit names, dates, release types)
    #[arg(long, env = "BANNER_SYNC_QUERY")]
    pub query: Option<String>,

    /// Output format for the reconciled timeline
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Read the configured fixture files instead of fetching the wiki
    #[arg(long, env = "BANNER_SYNC_OFFLINE")]
    pub offline: bool,

    /// Prometheus metrics port (0 = disabled)
    #[arg(long, default_value = "0", env = "BANNER_SYNC_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Timeline output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}
