// src/version/mod.rs

//! Build-time version metadata for the simulation's `version.h`.
//!
//! Version info is computed fresh on every call and returned by value.

pub mod git;
pub mod header;

pub use git::git_version;
pub use header::{render_header, write_header};

/// Version strings baked into `version.h`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// Description plus commit date, e.g. `VIC.5.0.0-12-gab3f Fri Sep 18 2015`.
    pub full: String,
    pub short: String,
    pub tag: String,
}
