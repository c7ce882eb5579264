// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `vic-case`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "vic-case",
    version,
    about = "Build and run VIC simulation cases, with timestamped logs.",
    long_about = None
)]
pub struct CliArgs {
    /// Case directory; all configured paths are relative to it.
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub case_dir: PathBuf,

    /// Path to the case config (TOML).
    ///
    /// Default: `vic-case.toml` in the case directory. A missing default
    /// config means the conventional case layout.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `VIC_CASE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Resolve the case and print what would run, without running anything.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: CaseCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CaseCommand {
    /// Build the simulation binary, recording progress in the case readme.
    Build,

    /// Run the simulation; exits with the simulation's exit status.
    Run,

    /// Append a message to the case readme.
    Log {
        /// Message text; a trailing newline is added if missing.
        message: String,
    },

    /// Generate the C `version.h` header from git metadata.
    VersionHeader {
        /// Write here instead of the configured header path.
        #[arg(long, value_name = "PATH", conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the header instead of writing it.
        #[arg(long)]
        stdout: bool,
    },

    /// Print the current log-file timestamp token.
    Timestamp,
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
