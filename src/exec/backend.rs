// src/exec/backend.rs

//! Pluggable command backend.
//!
//! The process runner talks to a `CommandBackend` instead of spawning
//! processes directly. Production code uses [`ProcessBackend`]; tests can
//! provide a scripted implementation that never touches the OS.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{CaseError, Result};

/// Everything a finished child process produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    /// Exit code; `-1` when the child was terminated by a signal.
    pub exit_status: i32,
}

/// Trait abstracting how a command line is executed.
pub trait CommandBackend: Send + Sync {
    /// Run `argv` to completion and capture both output streams.
    ///
    /// A command that cannot be launched must yield [`CaseError::Spawn`];
    /// a command that runs and exits nonzero is *not* an error.
    fn execute<'a>(
        &'a self,
        argv: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<CapturedOutput>> + Send + 'a>>;
}

/// Real backend: spawns the argument vector directly, no shell in between.
#[derive(Debug, Clone, Default)]
pub struct ProcessBackend {
    working_dir: Option<PathBuf>,
}

impl ProcessBackend {
    pub fn new() -> Self {
        Self { working_dir: None }
    }

    /// Run children inside `dir` instead of the current directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
        }
    }
}

impl CommandBackend for ProcessBackend {
    fn execute<'a>(
        &'a self,
        argv: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<CapturedOutput>> + Send + 'a>> {
        Box::pin(async move {
            let (program, args) = argv.split_first().ok_or_else(|| {
                CaseError::InvalidInvocation("command line must not be empty".to_string())
            })?;

            let mut cmd = Command::new(program);
            cmd.args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);
            if let Some(dir) = &self.working_dir {
                cmd.current_dir(dir);
            }

            let child = cmd.spawn().map_err(|source| CaseError::Spawn {
                program: program.clone(),
                source,
            })?;
            info!(program = %program, pid = child.id(), "spawned child process");

            // Reads both pipes to EOF before reaping, so neither can fill up.
            let output = child
                .wait_with_output()
                .await
                .with_context(|| format!("waiting for '{program}'"))?;

            let exit_status = output.status.code().unwrap_or(-1);
            debug!(
                program = %program,
                exit_status,
                stdout_bytes = output.stdout.len(),
                stderr_bytes = output.stderr.len(),
                "child process exited"
            );

            Ok(CapturedOutput {
                stdout: output.stdout,
                stderr: output.stderr,
                exit_status,
            })
        })
    }
}
