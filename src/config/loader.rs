// src/config/loader.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{CaseConfig, RawCaseConfig};
use crate::errors::Result;
use crate::fs::FileSystem;

/// Load a configuration file and return the raw, unvalidated `RawCaseConfig`.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawCaseConfig> {
    let path = path.as_ref();
    let contents = fs.read_to_string(path)?;

    let config: RawCaseConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file and validate it.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<CaseConfig> {
    let raw_config = load_from_path(fs, &path)?;
    let config = CaseConfig::try_from(raw_config)?;
    Ok(config)
}

/// Like [`load_and_validate`], but a missing file yields the defaults.
///
/// Cases created before the config file existed have no `vic-case.toml`;
/// they get the conventional layout.
pub fn load_or_default(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<CaseConfig> {
    let path = path.as_ref();
    if !fs.exists(path) {
        debug!(path = %path.display(), "no case config found; using defaults");
        return Ok(CaseConfig::default());
    }
    load_and_validate(fs, path)
}

/// Default config file name inside a case directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("vic-case.toml")
}
