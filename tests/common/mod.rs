#![allow(dead_code)]

use std::path::Path;

pub use vic_case_test_utils::init_tracing;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

/// Matches `{prefix}.log.{YYYYMMDD}.{SSSSS}.txt`.
pub fn log_name_regex(prefix: &str) -> regex::Regex {
    regex::Regex::new(&format!(r"^{}\.log\.\d{{8}}\.\d{{5}}\.txt$", regex::escape(prefix)))
        .expect("valid regex")
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
