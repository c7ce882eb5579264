// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`backend`] provides the `CommandBackend` trait and the production
//!   `ProcessBackend` built on `tokio::process::Command`.
//! - [`runner`] runs a command through a backend, captures its output and
//!   writes the timestamped log file.

pub mod backend;
pub mod runner;

pub use backend::{CapturedOutput, CommandBackend, ProcessBackend};
pub use runner::{log_file_name, InvocationRecord, ProcessRunner};
