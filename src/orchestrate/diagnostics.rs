// src/orchestrate/diagnostics.rs

//! Operator-visible failure reports.
//!
//! These go to a [`DiagnosticSink`] rather than through `tracing`, so the
//! operator sees them regardless of the configured log level.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use crate::exec::InvocationRecord;
use crate::types::OperationKind;

/// A failed build or run, as shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: OperationKind,
    pub exit_status: i32,
    pub log_file: PathBuf,
    pub stderr: String,
}

impl Diagnostic {
    pub fn from_record(kind: OperationKind, record: &InvocationRecord) -> Self {
        Self {
            kind,
            exit_status: record.exit_status(),
            log_file: record.log_file().to_path_buf(),
            stderr: record.stderr_lossy(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error {} VIC.", self.kind.verb())?;
        writeln!(
            f,
            "See log file for more information: {}",
            self.log_file.display()
        )?;
        write!(f, "{}", self.stderr)
    }
}

pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Writes diagnostics to the process's stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        let mut stderr = std::io::stderr().lock();
        // Nothing sensible to do if stderr itself is gone.
        let _ = writeln!(stderr, "{diagnostic}");
    }
}
