// tests/readme_log.rs
mod common;
use crate::common::{init_tracing, TestResult};

use std::sync::Arc;

use vic_case::errors::CaseError;
use vic_case::fs::mock::MockFileSystem;
use vic_case::fs::RealFileSystem;
use vic_case::readme::{append_entry, format_entry, BuildStatus, CaseReadme};
use vic_case::timestamp::parse_iso;

/// Split `{timestamp} : {message}` and check the timestamp parses.
fn assert_entry(line: &str, expected_message: &str) {
    let (ts, message) = line
        .split_once(" : ")
        .unwrap_or_else(|| panic!("no separator in {line:?}"));
    assert!(parse_iso(ts).is_some(), "bad timestamp {ts:?} in {line:?}");
    assert_eq!(message, expected_message);
}

#[test]
fn two_entries_on_a_fresh_file_give_two_timestamped_lines() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let readme = dir.path().join("test0.readme.md");

    append_entry(&RealFileSystem, &readme, "Build Started\n")?;
    append_entry(&RealFileSystem, &readme, "Build Completed\n")?;

    let text = std::fs::read_to_string(&readme)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_entry(lines[0], "Build Started");
    assert_entry(lines[1], "Build Completed");
    Ok(())
}

#[test]
fn append_entry_writes_the_message_verbatim() -> TestResult {
    let dir = tempfile::tempdir()?;
    let readme = dir.path().join("case.readme.md");

    append_entry(&RealFileSystem, &readme, "first")?;
    append_entry(&RealFileSystem, &readme, "second")?;

    // No separator is added, so the entries run together on one line.
    let text = std::fs::read_to_string(&readme)?;
    assert_eq!(text.lines().count(), 1);
    assert!(text.ends_with(" : second"));
    assert!(text.contains("first"));
    Ok(())
}

#[test]
fn existing_readme_content_is_preserved() -> TestResult {
    let dir = tempfile::tempdir()?;
    let readme = dir.path().join("case.readme.md");
    std::fs::write(&readme, "# notes\n")?;

    append_entry(&RealFileSystem, &readme, "Build Started\n")?;

    let text = std::fs::read_to_string(&readme)?;
    assert!(text.starts_with("# notes\n"));
    assert_entry(text.lines().nth(1).unwrap(), "Build Started");
    Ok(())
}

#[test]
fn missing_parent_directory_is_a_log_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let readme = dir.path().join("no-such-dir").join("case.readme.md");

    match append_entry(&RealFileSystem, &readme, "Build Started\n") {
        Err(CaseError::LogWrite { path, .. }) => assert_eq!(path, readme),
        other => panic!("Expected LogWrite error, got: {:?}", other),
    }
}

#[test]
fn case_readme_records_statuses_one_per_line() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_dir("/case");
    let readme = CaseReadme::new(Arc::new(fs.clone()), "/case/test0.readme.md");

    readme.record(BuildStatus::Started)?;
    readme.record(BuildStatus::Failed)?;
    readme.note("rebuilt by hand\n")?;

    let text = String::from_utf8(fs.contents("/case/test0.readme.md").unwrap())?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_entry(lines[0], "Build Started");
    assert_entry(lines[1], "Build Failed");
    assert_entry(lines[2], "rebuilt by hand");
    assert!(text.ends_with('\n'));
    Ok(())
}

#[test]
fn format_entry_uses_space_colon_space() {
    assert_eq!(
        format_entry("2015-09-18T12:00:00.000000", "Build Completed"),
        "2015-09-18T12:00:00.000000 : Build Completed"
    );
    assert_eq!(BuildStatus::Completed.to_string(), "Build Completed");
}
