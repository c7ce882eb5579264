// src/config/mod.rs

//! Case configuration: TOML model, loading, validation and path resolution.

pub mod case;
pub mod loader;
pub mod model;
pub mod validate;

pub use case::CaseLayout;
pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{BuildSection, CaseConfig, CaseSection, RawCaseConfig, RunSection, VersionSection};
