// src/config/case.rs

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::model::{CaseConfig, CASENAME_PLACEHOLDER};
use crate::errors::{CaseError, Result};
use crate::orchestrate::Toolchain;
use crate::version::VersionInfo;

/// A case directory together with its configuration, with every configured
/// path resolved against the directory.
#[derive(Debug, Clone)]
pub struct CaseLayout {
    dir: PathBuf,
    name: String,
    config: CaseConfig,
}

impl CaseLayout {
    /// Resolve `config` against the case directory `dir`.
    ///
    /// The case name comes from `[case].name`, or else from the last
    /// component of `dir`.
    pub fn resolve(dir: impl AsRef<Path>, config: CaseConfig) -> Result<Self> {
        let dir = dir.as_ref();
        let dir = std::path::absolute(dir)
            .with_context(|| format!("resolving case directory {}", dir.display()))?;

        let name = match &config.case.name {
            Some(name) => name.clone(),
            None => dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    CaseError::ConfigError(format!(
                        "cannot derive a case name from {}; set [case].name",
                        dir.display()
                    ))
                })?,
        };

        Ok(Self { dir, name, config })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn readme(&self) -> PathBuf {
        self.dir.join(self.expand(&self.config.case.readme))
    }

    pub fn makefile(&self) -> PathBuf {
        self.dir.join(&self.config.build.makefile)
    }

    pub fn build_log_dir(&self) -> PathBuf {
        self.dir.join(&self.config.build.log_dir)
    }

    pub fn global_param(&self) -> PathBuf {
        self.dir.join(self.expand(&self.config.run.global_param))
    }

    pub fn run_log_dir(&self) -> PathBuf {
        self.dir.join(&self.config.run.log_dir)
    }

    pub fn toolchain(&self) -> Toolchain {
        Toolchain {
            build_tool: self.program(&self.config.build.tool),
            simulation_binary: self.program(&self.config.run.binary),
        }
    }

    pub fn repo(&self) -> PathBuf {
        self.dir.join(&self.config.version.repo)
    }

    pub fn version_header(&self) -> PathBuf {
        self.repo().join(&self.config.version.header)
    }

    pub fn git_candidates(&self) -> &[String] {
        &self.config.version.git
    }

    pub fn fallback_version(&self) -> VersionInfo {
        VersionInfo {
            full: self.config.version.fallback_full.clone(),
            short: self.config.version.fallback_short.clone(),
            tag: self.config.version.fallback_tag.clone(),
        }
    }

    fn expand(&self, template: &str) -> String {
        template.replace(CASENAME_PLACEHOLDER, &self.name)
    }

    /// Programs given as paths are anchored to the case directory; bare
    /// names are left for `PATH` lookup.
    fn program(&self, program: &str) -> String {
        if program.contains('/') || program.contains('\\') {
            self.dir.join(program).display().to_string()
        } else {
            program.to_string()
        }
    }
}
