// src/config/validate.rs

use crate::config::model::{CaseConfig, RawCaseConfig};
use crate::errors::{CaseError, Result};

impl TryFrom<RawCaseConfig> for CaseConfig {
    type Error = crate::errors::CaseError;

    fn try_from(raw: RawCaseConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(CaseConfig::new_unchecked(
            raw.case,
            raw.build,
            raw.run,
            raw.version,
        ))
    }
}

fn validate_raw_config(cfg: &RawCaseConfig) -> Result<()> {
    validate_case(cfg)?;
    ensure_non_empty("[build].tool", &cfg.build.tool)?;
    ensure_non_empty("[build].makefile", &cfg.build.makefile)?;
    ensure_non_empty("[build].log_dir", &cfg.build.log_dir)?;
    ensure_non_empty("[run].binary", &cfg.run.binary)?;
    ensure_non_empty("[run].global_param", &cfg.run.global_param)?;
    ensure_non_empty("[run].log_dir", &cfg.run.log_dir)?;
    validate_version(cfg)?;
    Ok(())
}

fn validate_case(cfg: &RawCaseConfig) -> Result<()> {
    if let Some(name) = &cfg.case.name {
        if name.trim().is_empty() {
            return Err(CaseError::ConfigError(
                "[case].name must not be empty when set".to_string(),
            ));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(CaseError::ConfigError(format!(
                "[case].name '{}' must not contain path separators",
                name
            )));
        }
    }
    ensure_non_empty("[case].readme", &cfg.case.readme)
}

fn validate_version(cfg: &RawCaseConfig) -> Result<()> {
    if cfg.version.git.is_empty() {
        return Err(CaseError::ConfigError(
            "[version].git must list at least one executable".to_string(),
        ));
    }
    for git in cfg.version.git.iter() {
        ensure_non_empty("[version].git entry", git)?;
    }
    ensure_non_empty("[version].repo", &cfg.version.repo)?;
    ensure_non_empty("[version].header", &cfg.version.header)?;
    Ok(())
}

fn ensure_non_empty(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CaseError::ConfigError(format!("{key} must not be empty")));
    }
    Ok(())
}
