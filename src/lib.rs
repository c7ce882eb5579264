// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod orchestrate;
pub mod readme;
pub mod timestamp;
pub mod types;
pub mod version;

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::{CaseCommand, CliArgs};
use crate::config::{default_config_path, load_or_default, CaseLayout};
use crate::errors::{CaseError, Result};
use crate::exec::{CommandBackend, InvocationRecord, ProcessBackend, ProcessRunner};
use crate::fs::{FileSystem, RealFileSystem};
use crate::orchestrate::{Orchestrator, RunOutcome, StderrSink};
use crate::readme::{BuildStatus, CaseReadme};

/// High-level entry point used by `main.rs`.
///
/// Resolves the case, wires the real backend, filesystem and diagnostic
/// sink, and dispatches the subcommand. Returns the process exit code.
pub async fn run(args: CliArgs) -> Result<i32> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| args.case_dir.join(default_config_path()));
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let config = load_or_default(fs.as_ref(), &config_path)?;
    let layout = CaseLayout::resolve(&args.case_dir, config)?;
    info!(case = %layout.name(), dir = %layout.dir().display(), "resolved case");

    if args.dry_run {
        print_dry_run(fs.as_ref(), &layout);
        return Ok(0);
    }

    let backend: Arc<dyn CommandBackend> = Arc::new(ProcessBackend::in_dir(layout.dir()));

    match args.command {
        CaseCommand::Build => {
            let orchestrator = orchestrator_for(&layout, backend, fs.clone());
            let readme = CaseReadme::new(fs, layout.readme());
            build_case(&orchestrator, &readme, &layout).await?;
            Ok(0)
        }
        CaseCommand::Run => {
            let orchestrator = orchestrator_for(&layout, backend, fs);
            let outcome = run_case(&orchestrator, &layout).await?;
            Ok(exit_code_for(&outcome))
        }
        CaseCommand::Log { message } => {
            CaseReadme::new(fs, layout.readme()).note(&message)?;
            Ok(0)
        }
        CaseCommand::VersionHeader { output, stdout } => {
            let version = version::git_version(
                backend.as_ref(),
                &layout.repo(),
                layout.git_candidates(),
                &layout.fallback_version(),
            )
            .await;
            let header = version::render_header(&version);

            if stdout {
                print!("{header}");
            } else {
                let path = match output {
                    Some(path) => layout.dir().join(path),
                    None => layout.version_header(),
                };
                version::write_header(fs.as_ref(), &path, &header)?;
            }
            Ok(0)
        }
        CaseCommand::Timestamp => {
            println!("{}", timestamp::now_token());
            Ok(0)
        }
    }
}

/// Orchestrator for `layout` that reports diagnostics on stderr.
pub fn orchestrator_for(
    layout: &CaseLayout,
    backend: Arc<dyn CommandBackend>,
    fs: Arc<dyn FileSystem>,
) -> Orchestrator {
    let runner = ProcessRunner::new(backend, fs);
    Orchestrator::new(runner, layout.toolchain(), Arc::new(StderrSink))
}

/// Build a case, recording `Build Started`, then `Build Completed` or
/// `Build Failed`, in its readme.
///
/// A failed build is still returned as [`CaseError::BuildFailed`] after the
/// readme entry is written. Spawn and log-write errors are returned without
/// a readme entry.
pub async fn build_case(
    orchestrator: &Orchestrator,
    readme: &CaseReadme,
    layout: &CaseLayout,
) -> Result<InvocationRecord> {
    readme.record(BuildStatus::Started)?;

    match orchestrator
        .build(&layout.makefile(), &layout.build_log_dir())
        .await
    {
        Ok(record) => {
            readme.record(BuildStatus::Completed)?;
            Ok(record)
        }
        Err(err @ CaseError::BuildFailed { .. }) => {
            readme.record(BuildStatus::Failed)?;
            Err(err)
        }
        Err(err) => Err(err),
    }
}

/// Run a case's simulation with its global parameter file.
pub async fn run_case(orchestrator: &Orchestrator, layout: &CaseLayout) -> Result<RunOutcome> {
    orchestrator
        .run(&layout.global_param(), &layout.run_log_dir())
        .await
}

/// Exit code for the `run` command: the simulation's own status, with
/// signal terminations (reported as `-1`) mapped to 1.
pub fn exit_code_for(outcome: &RunOutcome) -> i32 {
    match outcome.exit_status() {
        status if status < 0 => 1,
        status => status,
    }
}

/// Dry-run output: the resolved case and the command lines that would run.
fn print_dry_run(fs: &dyn FileSystem, layout: &CaseLayout) {
    let toolchain = layout.toolchain();

    println!("vic-case dry-run");
    println!("  case = {}", layout.name());
    println!("  dir = {}", layout.dir().display());
    println!("  readme = {}", layout.readme().display());
    println!();

    println!("build:");
    println!(
        "  cmd: {} -f {}",
        toolchain.build_tool,
        layout.makefile().display()
    );
    print_log_dir(fs, &layout.build_log_dir());

    println!("run:");
    println!(
        "  cmd: {} -g {}",
        toolchain.simulation_binary,
        layout.global_param().display()
    );
    print_log_dir(fs, &layout.run_log_dir());

    println!("version-header:");
    println!("  repo: {}", layout.repo().display());
    println!("  header: {}", layout.version_header().display());
    println!("  git: {:?}", layout.git_candidates());

    debug!("dry-run complete (no execution)");
}

fn print_log_dir(fs: &dyn FileSystem, dir: &Path) {
    if fs.is_dir(dir) {
        println!("  logs: {}", dir.display());
    } else {
        println!("  logs: {} (missing)", dir.display());
    }
}
