// tests/process_runner.rs
mod common;
use crate::common::{argv, file_name, init_tracing, log_name_regex, TestResult};

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use vic_case::errors::CaseError;
use vic_case::exec::{log_file_name, ProcessBackend, ProcessRunner};
use vic_case::fs::mock::MockFileSystem;
use vic_case::fs::{FileSystem, RealFileSystem};
use vic_case_test_utils::{with_timeout, FakeBackend};

fn real_runner() -> ProcessRunner {
    ProcessRunner::new(Arc::new(ProcessBackend::new()), Arc::new(RealFileSystem))
}

fn fixed_token() -> String {
    "20150918.43200".to_string()
}

#[cfg(unix)]
#[tokio::test]
async fn successful_command_logs_stdout_then_stderr() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let cmd = argv(&["sh", "-c", "printf 'out\\n'; printf 'err\\n' >&2; printf 'more'"]);
    let record = with_timeout(real_runner().run_logged(&cmd, dir.path(), "vic.bld")).await?;

    assert_eq!(record.exit_status(), 0);
    assert!(record.success());
    assert!(record.log_file().is_absolute());
    assert_eq!(record.log_file().parent(), Some(dir.path()));
    assert!(log_name_regex("vic.bld").is_match(&file_name(record.log_file())));

    assert_eq!(record.stdout(), b"out\nmore");
    assert_eq!(record.stderr(), b"err\n");
    assert_eq!(std::fs::read(record.log_file())?, b"out\nmoreerr\n");
    assert_eq!(record.command(), cmd.as_slice());
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn nonzero_exit_is_returned_and_still_logged() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let cmd = argv(&["sh", "-c", "echo partial; echo broken >&2; exit 3"]);
    let record = with_timeout(real_runner().run_logged(&cmd, dir.path(), "vic.run")).await?;

    assert_eq!(record.exit_status(), 3);
    assert!(!record.success());
    assert_eq!(std::fs::read(record.log_file())?, b"partial\nbroken\n");
    assert!(log_name_regex("vic.run").is_match(&file_name(record.log_file())));
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn arguments_are_passed_without_a_shell() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    // A shell would expand `$HOME` and split on the space.
    let cmd = argv(&["printf", "%s|", "$HOME", "two words"]);
    let record = real_runner().run_logged(&cmd, dir.path(), "vic.run").await?;

    assert_eq!(record.stdout(), b"$HOME|two words|");
    Ok(())
}

#[tokio::test]
async fn missing_program_is_a_spawn_error_and_writes_no_log() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;

    let cmd = argv(&["vic-case-definitely-not-installed", "-f", "Makefile"]);
    let result = real_runner().run_logged(&cmd, dir.path(), "vic.bld").await;

    match result {
        Err(CaseError::Spawn { program, .. }) => {
            assert_eq!(program, "vic-case-definitely-not-installed");
        }
        Err(e) => panic!("Expected Spawn error, got: {:?}", e),
        Ok(r) => panic!("Expected error, got Ok({:?})", r),
    }
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn empty_command_is_rejected() {
    let fs = MockFileSystem::new();
    fs.add_dir("/logs");
    let backend = FakeBackend::new();
    let runner = ProcessRunner::new(Arc::new(backend.clone()), Arc::new(fs));

    let result = runner.run_logged(&[], Path::new("/logs"), "vic.run").await;
    assert!(matches!(result, Err(CaseError::InvalidInvocation(_))));

    let result = runner
        .run_logged(&argv(&[""]), Path::new("/logs"), "vic.run")
        .await;
    assert!(matches!(result, Err(CaseError::InvalidInvocation(_))));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn missing_log_directory_is_rejected_before_spawning() {
    let fs = MockFileSystem::new();
    let backend = FakeBackend::new();
    let runner = ProcessRunner::new(Arc::new(backend.clone()), Arc::new(fs));

    let result = runner
        .run_logged(&argv(&["make"]), Path::new("/case/Build/logs"), "vic.bld")
        .await;

    match result {
        Err(CaseError::InvalidInvocation(msg)) => {
            assert!(msg.contains("/case/Build/logs"));
        }
        other => panic!("Expected InvalidInvocation, got: {:?}", other),
    }
    assert!(backend.calls().is_empty(), "nothing should have been spawned");
}

#[tokio::test]
async fn colliding_timestamps_get_a_suffix_instead_of_overwriting() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_dir("/logs");
    let backend = FakeBackend::new()
        .on("first", "first run\n", "", 0)
        .on("second", "second run\n", "", 0);
    let runner =
        ProcessRunner::new(Arc::new(backend), Arc::new(fs.clone())).with_clock(fixed_token);

    let a = runner
        .run_logged(&argv(&["echo", "first"]), Path::new("/logs"), "vic.run")
        .await?;
    let b = runner
        .run_logged(&argv(&["echo", "second"]), Path::new("/logs"), "vic.run")
        .await?;

    assert_eq!(file_name(a.log_file()), "vic.run.log.20150918.43200.txt");
    assert_eq!(file_name(b.log_file()), "vic.run.log.20150918.43200.1.txt");
    assert_eq!(a.timestamp(), b.timestamp());

    assert_eq!(fs.contents(a.log_file()).unwrap(), b"first run\n");
    assert_eq!(fs.contents(b.log_file()).unwrap(), b"second run\n");
    Ok(())
}

#[test]
fn log_file_names_follow_prefix_log_timestamp_txt() {
    assert_eq!(
        log_file_name("vic.bld", "20150918.43200", 0),
        "vic.bld.log.20150918.43200.txt"
    );
    assert_eq!(
        log_file_name("vic.bld", "20150918.43200", 2),
        "vic.bld.log.20150918.43200.2.txt"
    );
}

/// Real filesystem whose first `create_new` fails with `kind`.
///
/// With `AlreadyExists` the name is really taken first, as when another case
/// script logs in the same second.
#[derive(Debug)]
struct ContendedFs {
    kind: io::ErrorKind,
    create_calls: AtomicUsize,
}

impl ContendedFs {
    fn failing_once_with(kind: io::ErrorKind) -> Self {
        Self {
            kind,
            create_calls: AtomicUsize::new(0),
        }
    }

    fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

impl FileSystem for ContendedFs {
    fn read_to_string(&self, path: &Path) -> anyhow::Result<String> {
        RealFileSystem.read_to_string(path)
    }

    fn create_new(&self, path: &Path, contents: &[u8]) -> anyhow::Result<()> {
        if self.create_calls.fetch_add(1, Ordering::SeqCst) == 0 {
            if self.kind == io::ErrorKind::AlreadyExists {
                std::fs::write(path, b"other case script\n")?;
            }
            return Err(anyhow::Error::new(io::Error::from(self.kind))
                .context(format!("creating file {:?}", path)));
        }
        RealFileSystem.create_new(path, contents)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> anyhow::Result<()> {
        RealFileSystem.write(path, contents)
    }

    fn append(&self, path: &Path, contents: &[u8]) -> anyhow::Result<()> {
        RealFileSystem.append(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        RealFileSystem.exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        RealFileSystem.is_dir(path)
    }

    fn absolute(&self, path: &Path) -> anyhow::Result<PathBuf> {
        RealFileSystem.absolute(path)
    }
}

#[tokio::test]
async fn log_name_taken_while_the_command_ran_falls_through_to_a_suffix() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let fs = Arc::new(ContendedFs::failing_once_with(io::ErrorKind::AlreadyExists));
    let backend = FakeBackend::new().on("ran", "ran\n", "", 0);
    let runner = ProcessRunner::new(Arc::new(backend), fs.clone()).with_clock(fixed_token);

    let record = runner
        .run_logged(&argv(&["echo", "ran"]), dir.path(), "vic.run")
        .await?;

    assert_eq!(file_name(record.log_file()), "vic.run.log.20150918.43200.1.txt");
    assert_eq!(std::fs::read(record.log_file())?, b"ran\n");
    assert_eq!(
        std::fs::read(dir.path().join("vic.run.log.20150918.43200.txt"))?,
        b"other case script\n"
    );
    assert_eq!(fs.create_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn other_log_create_failures_are_not_retried() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let fs = Arc::new(ContendedFs::failing_once_with(io::ErrorKind::PermissionDenied));
    let runner =
        ProcessRunner::new(Arc::new(FakeBackend::new()), fs.clone()).with_clock(fixed_token);

    let result = runner
        .run_logged(&argv(&["make"]), dir.path(), "vic.bld")
        .await;

    match result {
        Err(CaseError::LogWrite { path, .. }) => {
            assert_eq!(file_name(&path), "vic.bld.log.20150918.43200.txt");
        }
        other => panic!("Expected LogWrite, got: {:?}", other),
    }
    assert_eq!(fs.create_calls(), 1);
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}
