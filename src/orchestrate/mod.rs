// src/orchestrate/mod.rs

//! Build and run operations for a case.
//!
//! Both operations walk the same lifecycle (see [`OperationState`]) but fail
//! differently:
//!
//! - `build` turns a nonzero exit into [`CaseError::BuildFailed`];
//! - `run` reports a nonzero exit as [`RunOutcome::Failed`] and leaves the
//!   decision to the caller.
//!
//! Callers branch on these differently (the `build` command records the
//! failure in the readme, `run` forwards the exit status), so the two
//! policies are kept as they are.

pub mod diagnostics;

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::errors::{CaseError, Result};
use crate::exec::{InvocationRecord, ProcessRunner};
use crate::types::{OperationKind, OperationState};

pub use diagnostics::{Diagnostic, DiagnosticSink, StderrSink};

/// External programs a case drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Invoked as `<build_tool> -f <makefile>`.
    pub build_tool: String,
    /// Invoked as `<simulation_binary> -g <global_param_file>`.
    pub simulation_binary: String,
}

/// Result of a run operation. Never an error: the caller decides what a
/// failed simulation means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(InvocationRecord),
    Failed(InvocationRecord),
}

impl RunOutcome {
    pub fn record(&self) -> &InvocationRecord {
        match self {
            RunOutcome::Completed(record) | RunOutcome::Failed(record) => record,
        }
    }

    pub fn exit_status(&self) -> i32 {
        self.record().exit_status()
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}

/// Lifecycle tracker for one operation; every transition is traced.
#[derive(Debug)]
struct Operation {
    kind: OperationKind,
    state: OperationState,
}

impl Operation {
    fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            state: OperationState::NotStarted,
        }
    }

    fn advance(&mut self, next: OperationState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid {} transition {} -> {}",
            self.kind,
            self.state,
            next
        );
        info!(operation = %self.kind, from = %self.state, to = %next, "operation state changed");
        self.state = next;
    }
}

/// Composes the process runner with per-operation command lines and
/// failure policy.
#[derive(Clone)]
pub struct Orchestrator {
    runner: ProcessRunner,
    toolchain: Toolchain,
    sink: Arc<dyn DiagnosticSink>,
}

impl Orchestrator {
    pub fn new(runner: ProcessRunner, toolchain: Toolchain, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            runner,
            toolchain,
            sink,
        }
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Command line used to build from `makefile` (already absolute).
    pub fn build_command(&self, makefile: &Path) -> Vec<String> {
        vec![
            self.toolchain.build_tool.clone(),
            "-f".to_string(),
            makefile.display().to_string(),
        ]
    }

    /// Command line used to run with `global_param` (already absolute).
    pub fn run_command(&self, global_param: &Path) -> Vec<String> {
        vec![
            self.toolchain.simulation_binary.clone(),
            "-g".to_string(),
            global_param.display().to_string(),
        ]
    }

    /// Build the simulation binary with `makefile`, logging into `log_dir`.
    ///
    /// A nonzero exit from the build tool is emitted as a diagnostic and
    /// returned as [`CaseError::BuildFailed`].
    pub async fn build(&self, makefile: &Path, log_dir: &Path) -> Result<InvocationRecord> {
        let kind = OperationKind::Build;
        let mut op = Operation::new(kind);

        let makefile = self.absolute(makefile)?;
        let command = self.build_command(&makefile);

        op.advance(OperationState::Running);
        let record = self
            .runner
            .run_logged(&command, log_dir, kind.log_prefix())
            .await?;

        if record.success() {
            op.advance(OperationState::Completed);
            return Ok(record);
        }

        op.advance(OperationState::Failed);
        error!(
            exit_status = record.exit_status(),
            log_file = %record.log_file().display(),
            "build failed"
        );
        self.sink.emit(&Diagnostic::from_record(kind, &record));

        Err(CaseError::BuildFailed {
            status: record.exit_status(),
            log_file: record.log_file().to_path_buf(),
        })
    }

    /// Run the simulation with `global_param`, logging into `log_dir`.
    ///
    /// Only spawn and log-write problems are errors; a nonzero exit comes
    /// back as [`RunOutcome::Failed`] after the diagnostic is emitted.
    pub async fn run(&self, global_param: &Path, log_dir: &Path) -> Result<RunOutcome> {
        let kind = OperationKind::Run;
        let mut op = Operation::new(kind);

        let global_param = self.absolute(global_param)?;
        let command = self.run_command(&global_param);

        op.advance(OperationState::Running);
        let record = self
            .runner
            .run_logged(&command, log_dir, kind.log_prefix())
            .await?;

        if record.success() {
            op.advance(OperationState::Completed);
            return Ok(RunOutcome::Completed(record));
        }

        op.advance(OperationState::Failed);
        warn!(
            exit_status = record.exit_status(),
            log_file = %record.log_file().display(),
            "simulation exited with nonzero status"
        );
        self.sink.emit(&Diagnostic::from_record(kind, &record));

        Ok(RunOutcome::Failed(record))
    }

    fn absolute(&self, path: &Path) -> Result<std::path::PathBuf> {
        Ok(self.runner.fs().absolute(path)?)
    }
}
