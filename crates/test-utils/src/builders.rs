#![allow(dead_code)]

use std::sync::Arc;

use vic_case::config::{CaseConfig, RawCaseConfig};
use vic_case::exec::{CommandBackend, ProcessRunner};
use vic_case::fs::FileSystem;
use vic_case::orchestrate::{DiagnosticSink, Orchestrator, Toolchain};

/// Builder for `CaseConfig` to simplify test setup.
pub struct CaseConfigBuilder {
    config: RawCaseConfig,
}

impl CaseConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawCaseConfig::default(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.config.case.name = Some(name.to_string());
        self
    }

    pub fn readme(mut self, template: &str) -> Self {
        self.config.case.readme = template.to_string();
        self
    }

    pub fn build_tool(mut self, tool: &str) -> Self {
        self.config.build.tool = tool.to_string();
        self
    }

    pub fn makefile(mut self, path: &str) -> Self {
        self.config.build.makefile = path.to_string();
        self
    }

    pub fn build_log_dir(mut self, path: &str) -> Self {
        self.config.build.log_dir = path.to_string();
        self
    }

    pub fn binary(mut self, binary: &str) -> Self {
        self.config.run.binary = binary.to_string();
        self
    }

    pub fn global_param(mut self, template: &str) -> Self {
        self.config.run.global_param = template.to_string();
        self
    }

    pub fn run_log_dir(mut self, path: &str) -> Self {
        self.config.run.log_dir = path.to_string();
        self
    }

    pub fn git(mut self, candidates: &[&str]) -> Self {
        self.config.version.git = candidates.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn build(self) -> CaseConfig {
        CaseConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for CaseConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Orchestrator over the given backend, filesystem and sink, with
/// `make` / `vic` as the toolchain.
pub fn orchestrator(
    backend: Arc<dyn CommandBackend>,
    fs: Arc<dyn FileSystem>,
    sink: Arc<dyn DiagnosticSink>,
) -> Orchestrator {
    orchestrator_with_clock(backend, fs, sink, vic_case::timestamp::now_token)
}

/// Like [`orchestrator`], with a fixed timestamp source.
pub fn orchestrator_with_clock(
    backend: Arc<dyn CommandBackend>,
    fs: Arc<dyn FileSystem>,
    sink: Arc<dyn DiagnosticSink>,
    clock: fn() -> String,
) -> Orchestrator {
    let runner = ProcessRunner::new(backend, fs).with_clock(clock);
    Orchestrator::new(
        runner,
        Toolchain {
            build_tool: "make".to_string(),
            simulation_binary: "vic".to_string(),
        },
        sink,
    )
}
