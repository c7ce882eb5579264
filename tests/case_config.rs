// tests/case_config.rs
mod common;
use crate::common::TestResult;

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use vic_case::config::{load_and_validate, load_or_default, CaseLayout};
use vic_case::errors::CaseError;
use vic_case::fs::mock::MockFileSystem;
use vic_case::fs::RealFileSystem;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn missing_config_file_means_conventional_layout() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cfg = load_or_default(&RealFileSystem, dir.path().join("vic-case.toml"))?;

    assert_eq!(cfg.build.tool, "make");
    assert_eq!(cfg.build.makefile, "Build/Makefile");
    assert_eq!(cfg.build.log_dir, "Build/logs");
    assert_eq!(cfg.run.binary, "Build/bin/vic");
    assert_eq!(cfg.run.global_param, "{casename}_global_param.txt");
    assert_eq!(cfg.run.log_dir, "logs");
    assert_eq!(cfg.version.git, vec!["git", "git.cmd"]);
    assert!(cfg.case.name.is_none());
    Ok(())
}

#[test]
fn layout_resolves_paths_against_the_case_directory() -> TestResult {
    let file = config_file(
        r#"
[run]
binary = "/opt/vic/bin/vic_classic"
"#,
    );
    let cfg = load_and_validate(&RealFileSystem, file.path())?;
    let layout = CaseLayout::resolve("/data/cases/columbia", cfg)?;

    assert_eq!(layout.name(), "columbia");
    assert_eq!(
        layout.readme(),
        Path::new("/data/cases/columbia/columbia.readme.md")
    );
    assert_eq!(
        layout.makefile(),
        Path::new("/data/cases/columbia/Build/Makefile")
    );
    assert_eq!(
        layout.global_param(),
        Path::new("/data/cases/columbia/columbia_global_param.txt")
    );
    assert_eq!(layout.run_log_dir(), Path::new("/data/cases/columbia/logs"));

    let toolchain = layout.toolchain();
    assert_eq!(toolchain.build_tool, "make");
    assert_eq!(toolchain.simulation_binary, "/opt/vic/bin/vic_classic");
    Ok(())
}

#[test]
fn relative_binary_is_anchored_and_name_can_be_overridden() -> TestResult {
    let file = config_file(
        r#"
[case]
name = "test0"
readme = "notes/{casename}.md"

[run]
global_param = "params/global.txt"
"#,
    );
    let cfg = load_and_validate(&RealFileSystem, file.path())?;
    let layout = CaseLayout::resolve("/work/case-dir", cfg)?;

    assert_eq!(layout.name(), "test0");
    assert_eq!(layout.readme(), Path::new("/work/case-dir/notes/test0.md"));
    assert_eq!(
        layout.global_param(),
        Path::new("/work/case-dir/params/global.txt")
    );
    assert_eq!(
        layout.toolchain().simulation_binary,
        "/work/case-dir/Build/bin/vic"
    );
    Ok(())
}

#[test]
fn empty_build_tool_is_a_config_error() {
    let file = config_file(
        r#"
[build]
tool = ""
"#,
    );

    match load_and_validate(&RealFileSystem, file.path()) {
        Err(CaseError::ConfigError(msg)) => assert!(msg.contains("[build].tool")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn empty_git_candidate_list_is_a_config_error() {
    let file = config_file(
        r#"
[version]
git = []
"#,
    );

    assert!(matches!(
        load_and_validate(&RealFileSystem, file.path()),
        Err(CaseError::ConfigError(_))
    ));
}

#[test]
fn case_name_with_separator_is_rejected() {
    let file = config_file(
        r#"
[case]
name = "../escape"
"#,
    );

    match load_and_validate(&RealFileSystem, file.path()) {
        Err(CaseError::ConfigError(msg)) => assert!(msg.contains("path separators")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn malformed_toml_is_a_toml_error() {
    let file = config_file("[build\ntool = make");
    assert!(matches!(
        load_and_validate(&RealFileSystem, file.path()),
        Err(CaseError::TomlError(_))
    ));
}

#[test]
fn root_directory_without_name_cannot_be_resolved() {
    let cfg = vic_case::config::CaseConfig::default();
    assert!(matches!(
        CaseLayout::resolve("/", cfg),
        Err(CaseError::ConfigError(_))
    ));
}

#[test]
fn config_is_read_through_the_filesystem() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file(
        "/data/test0/vic-case.toml",
        "[build]\ntool = \"gmake\"\nlog_dir = \"build-logs\"\n",
    );

    let cfg = load_or_default(&fs, "/data/test0/vic-case.toml")?;
    assert_eq!(cfg.build.tool, "gmake");
    assert_eq!(cfg.build.log_dir, "build-logs");
    assert_eq!(cfg.run.binary, "Build/bin/vic");

    let cfg = load_or_default(&fs, "/data/other/vic-case.toml")?;
    assert_eq!(cfg.build.tool, "make");
    Ok(())
}
