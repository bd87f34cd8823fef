// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `when_changed`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "when_changed",
    version,
    about = "Run a command whenever files change, once per settled burst of changes.",
    long_about = None
)]
pub struct CliArgs {
    /// What to watch: `dir/` (recursive), `dir`, `dir/*.rs`, `dir/**`, `file.txt`.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Command to run. `$1` is replaced with the changed file's path.
    ///
    /// A single quoted argument is split on whitespace.
    #[arg(
        value_name = "COMMAND",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,

    /// Path to a config file (TOML).
    ///
    /// Default: `WhenChanged.toml` in the current directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Settle delay before each run, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub settle_ms: Option<u64>,

    /// Placeholder token replaced with the changed path.
    #[arg(long, value_name = "TOKEN")]
    pub placeholder: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WHEN_CHANGED_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve the watch target and command, print them, don't watch.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
