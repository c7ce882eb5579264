// src/exec/runner.rs

//! Run a command and persist its output to a timestamped log file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::{CaseError, Result};
use crate::exec::backend::{CapturedOutput, CommandBackend};
use crate::fs::FileSystem;
use crate::timestamp;

/// Upper bound on `.1`, `.2`, ... suffixes tried when log names collide.
const MAX_COLLISION_SUFFIX: u32 = 1000;

/// Result of one logged command invocation.
///
/// Fully populated before [`ProcessRunner::run_logged`] returns and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRecord {
    command: Vec<String>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    exit_status: i32,
    timestamp: String,
    log_file: PathBuf,
}

impl InvocationRecord {
    pub fn command(&self) -> &[String] {
        &self.command
    }

    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }

    pub fn exit_status(&self) -> i32 {
        self.exit_status
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Absolute path of the log file holding stdout followed by stderr.
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn success(&self) -> bool {
        self.exit_status == 0
    }

    /// Captured stderr, lossily decoded for diagnostics.
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Log-file name for `prefix` and `token`; `attempt > 0` adds a suffix used
/// only when an earlier invocation already took the plain name.
pub fn log_file_name(prefix: &str, token: &str, attempt: u32) -> String {
    if attempt == 0 {
        format!("{prefix}.log.{token}.txt")
    } else {
        format!("{prefix}.log.{token}.{attempt}.txt")
    }
}

/// Spawns commands through a [`CommandBackend`] and writes their log files
/// through a [`FileSystem`].
#[derive(Clone)]
pub struct ProcessRunner {
    backend: Arc<dyn CommandBackend>,
    fs: Arc<dyn FileSystem>,
    clock: fn() -> String,
}

impl ProcessRunner {
    pub fn new(backend: Arc<dyn CommandBackend>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            backend,
            fs,
            clock: timestamp::now_token,
        }
    }

    /// Replace the timestamp source (fixed tokens make collisions testable).
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    pub fn fs(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Run `command`, wait for it, and write `{log_prefix}.log.{timestamp}.txt`
    /// into `log_dir`.
    ///
    /// A nonzero exit status is returned as data in the record. Errors are
    /// reserved for precondition violations, spawn failures and log writes.
    pub async fn run_logged(
        &self,
        command: &[String],
        log_dir: &Path,
        log_prefix: &str,
    ) -> Result<InvocationRecord> {
        if command.first().is_none_or(|program| program.is_empty()) {
            return Err(CaseError::InvalidInvocation(
                "command line must not be empty".to_string(),
            ));
        }
        if !self.fs.is_dir(log_dir) {
            return Err(CaseError::InvalidInvocation(format!(
                "log directory {} does not exist",
                log_dir.display()
            )));
        }

        let token = (self.clock)();
        info!(command = ?command, log_prefix, timestamp = %token, "running command");

        let output = self.backend.execute(command).await?;
        let log_file = self.write_log(log_dir, log_prefix, &token, &output)?;

        info!(
            exit_status = output.exit_status,
            log_file = %log_file.display(),
            "command finished"
        );

        Ok(InvocationRecord {
            command: command.to_vec(),
            stdout: output.stdout,
            stderr: output.stderr,
            exit_status: output.exit_status,
            timestamp: token,
            log_file,
        })
    }

    fn write_log(
        &self,
        log_dir: &Path,
        log_prefix: &str,
        token: &str,
        output: &CapturedOutput,
    ) -> Result<PathBuf> {
        let dir = self.fs.absolute(log_dir).map_err(|source| CaseError::LogWrite {
            path: log_dir.to_path_buf(),
            source,
        })?;

        let mut contents = Vec::with_capacity(output.stdout.len() + output.stderr.len());
        contents.extend_from_slice(&output.stdout);
        contents.extend_from_slice(&output.stderr);

        for attempt in 0..=MAX_COLLISION_SUFFIX {
            let path = dir.join(log_file_name(log_prefix, token, attempt));
            match self.fs.create_new(&path, &contents) {
                Ok(()) => {
                    if attempt > 0 {
                        warn!(
                            log_file = %path.display(),
                            "log name for this timestamp already taken; using suffixed name"
                        );
                    }
                    return Ok(path);
                }
                Err(err) if is_already_exists(&err) => {
                    debug!(log_file = %path.display(), "log name taken");
                }
                Err(source) => return Err(CaseError::LogWrite { path, source }),
            }
        }

        Err(CaseError::LogWrite {
            path: dir.join(log_file_name(log_prefix, token, 0)),
            source: anyhow::anyhow!(
                "more than {MAX_COLLISION_SUFFIX} log files share timestamp {token}"
            ),
        })
    }
}

/// Whether a filesystem error means the target name is already taken.
fn is_already_exists(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::AlreadyExists)
    })
}
