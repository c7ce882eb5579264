// src/readme.rs

//! Per-case readme: an append-only status log.
//!
//! Each entry is `{ISO-8601 local timestamp} : {message}`.
//! [`append_entry`] writes the message verbatim, so callers that want one
//! entry per line must end their messages with a newline. [`CaseReadme`]
//! does that for the status convention used by the `build` command.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::errors::{CaseError, Result};
use crate::fs::FileSystem;
use crate::timestamp;

/// Append one `{timestamp} : {message}` entry to `path`, creating the file if
/// it does not exist. The parent directory must already exist.
pub fn append_entry(fs: &dyn FileSystem, path: &Path, message: &str) -> Result<()> {
    let entry = format_entry(&timestamp::iso_now(), message);
    fs.append(path, entry.as_bytes())
        .map_err(|source| CaseError::LogWrite {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(readme = %path.display(), message, "appended readme entry");
    Ok(())
}

pub fn format_entry(timestamp: &str, message: &str) -> String {
    format!("{timestamp} : {message}")
}

/// Build status recorded around an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    Started,
    Completed,
    Failed,
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStatus::Started => f.write_str("Build Started"),
            BuildStatus::Completed => f.write_str("Build Completed"),
            BuildStatus::Failed => f.write_str("Build Failed"),
        }
    }
}

/// A case's readme file plus the filesystem it lives on.
#[derive(Clone)]
pub struct CaseReadme {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl CaseReadme {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `message` as its own line.
    pub fn note(&self, message: &str) -> Result<()> {
        let line = if message.ends_with('\n') {
            message.to_string()
        } else {
            format!("{message}\n")
        };
        append_entry(self.fs.as_ref(), &self.path, &line)
    }

    pub fn record(&self, status: BuildStatus) -> Result<()> {
        self.note(&status.to_string())
    }
}
