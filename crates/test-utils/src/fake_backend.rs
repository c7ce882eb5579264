use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use vic_case::errors::{CaseError, Result};
use vic_case::exec::{CapturedOutput, CommandBackend};
use vic_case::orchestrate::{Diagnostic, DiagnosticSink};

/// A scripted command backend that:
/// - records every argv it is asked to run
/// - answers with the first rule whose needle occurs in the joined argv
/// - fails to "spawn" programs marked as missing
/// - otherwise exits 0 with no output.
#[derive(Clone, Default)]
pub struct FakeBackend {
    rules: Arc<Mutex<Vec<(String, CapturedOutput)>>>,
    missing: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer any command line containing `needle` with the given output.
    pub fn on(self, needle: &str, stdout: &str, stderr: &str, exit_status: i32) -> Self {
        self.rules.lock().unwrap().push((
            needle.to_string(),
            CapturedOutput {
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
                exit_status,
            },
        ));
        self
    }

    /// Make `program` fail to spawn, as if it were not installed.
    pub fn missing(self, program: &str) -> Self {
        self.missing.lock().unwrap().push(program.to_string());
        self
    }

    /// Every argv executed so far, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandBackend for FakeBackend {
    fn execute<'a>(
        &'a self,
        argv: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<CapturedOutput>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(argv.to_vec());

            let program = argv.first().cloned().unwrap_or_default();
            if self.missing.lock().unwrap().contains(&program) {
                return Err(CaseError::Spawn {
                    program,
                    source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
                });
            }

            let joined = argv.join(" ");
            let rules = self.rules.lock().unwrap();
            let output = rules
                .iter()
                .find(|(needle, _)| joined.contains(needle.as_str()))
                .map(|(_, output)| output.clone())
                .unwrap_or_default();
            Ok(output)
        })
    }
}

/// Diagnostic sink that keeps everything it is given.
#[derive(Clone, Default)]
pub struct MemorySink {
    emitted: Arc<Mutex<Vec<Diagnostic>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.emitted.lock().unwrap().clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.emitted.lock().unwrap().push(diagnostic.clone());
    }
}
