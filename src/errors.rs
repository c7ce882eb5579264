// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! A child process that exits nonzero is *not* an error at the process-runner
//! layer; it only becomes one when the build operation maps it to
//! [`CaseError::BuildFailed`]. A failed simulation run is reported as a value
//! (see [`crate::orchestrate::RunOutcome`]).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaseError {
    /// The external command could not be launched at all.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The build tool exited nonzero.
    #[error("build failed with exit status {status}; see log file {}", log_file.display())]
    BuildFailed { status: i32, log_file: PathBuf },

    /// A log or readme file could not be written.
    #[error("failed to write log file {}: {source}", path.display())]
    LogWrite {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The caller broke a precondition (empty command, missing log dir, ...).
    #[error("invalid invocation: {0}")]
    InvalidInvocation(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaseError {
    /// Process exit code the CLI should use when this error reaches `main`.
    pub fn exit_code(&self) -> i32 {
        match self {
            CaseError::InvalidInvocation(_) | CaseError::ConfigError(_) => 2,
            _ => 1,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CaseError>;
