// src/config/model.rs

use serde::Deserialize;

/// Placeholder substituted with the case name in path templates.
pub const CASENAME_PLACEHOLDER: &str = "{casename}";

/// Case configuration as read from `vic-case.toml`.
///
/// ```toml
/// [case]
/// name = "test0"
///
/// [build]
/// tool = "make"
/// makefile = "Build/Makefile"
///
/// [run]
/// binary = "Build/bin/vic"
/// global_param = "{casename}_global_param.txt"
/// ```
///
/// Every section and key is optional; a missing file means "all defaults".
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawCaseConfig {
    #[serde(default)]
    pub case: CaseSection,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub run: RunSection,

    #[serde(default)]
    pub version: VersionSection,
}

/// Validated configuration. Construct through `CaseConfig::try_from`.
#[derive(Debug, Clone)]
pub struct CaseConfig {
    pub case: CaseSection,
    pub build: BuildSection,
    pub run: RunSection,
    pub version: VersionSection,
}

impl CaseConfig {
    pub(crate) fn new_unchecked(
        case: CaseSection,
        build: BuildSection,
        run: RunSection,
        version: VersionSection,
    ) -> Self {
        Self {
            case,
            build,
            run,
            version,
        }
    }
}

impl Default for CaseConfig {
    fn default() -> Self {
        let raw = RawCaseConfig::default();
        Self::new_unchecked(raw.case, raw.build, raw.run, raw.version)
    }
}

/// `[case]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct CaseSection {
    /// Case name; defaults to the case directory's name.
    #[serde(default)]
    pub name: Option<String>,

    /// Readme path template, relative to the case directory.
    #[serde(default = "default_readme")]
    pub readme: String,
}

fn default_readme() -> String {
    "{casename}.readme.md".to_string()
}

impl Default for CaseSection {
    fn default() -> Self {
        Self {
            name: None,
            readme: default_readme(),
        }
    }
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
    /// Build tool, invoked as `<tool> -f <makefile>`.
    #[serde(default = "default_build_tool")]
    pub tool: String,

    #[serde(default = "default_makefile")]
    pub makefile: String,

    /// Must exist before a build; it is not created.
    #[serde(default = "default_build_log_dir")]
    pub log_dir: String,
}

fn default_build_tool() -> String {
    "make".to_string()
}

fn default_makefile() -> String {
    "Build/Makefile".to_string()
}

fn default_build_log_dir() -> String {
    "Build/logs".to_string()
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            tool: default_build_tool(),
            makefile: default_makefile(),
            log_dir: default_build_log_dir(),
        }
    }
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSection {
    /// Simulation binary, invoked as `<binary> -g <global_param>`.
    ///
    /// A value containing a path separator is resolved against the case
    /// directory; a bare name is looked up on `PATH`.
    #[serde(default = "default_binary")]
    pub binary: String,

    #[serde(default = "default_global_param")]
    pub global_param: String,

    #[serde(default = "default_run_log_dir")]
    pub log_dir: String,
}

fn default_binary() -> String {
    "Build/bin/vic".to_string()
}

fn default_global_param() -> String {
    "{casename}_global_param.txt".to_string()
}

fn default_run_log_dir() -> String {
    "logs".to_string()
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            global_param: default_global_param(),
            log_dir: default_run_log_dir(),
        }
    }
}

/// `[version]` section, used by `version-header`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionSection {
    /// Checkout to describe, relative to the case directory.
    #[serde(default = "default_repo")]
    pub repo: String,

    /// Git executables to try, in order.
    #[serde(default = "default_git")]
    pub git: Vec<String>,

    /// Header path, relative to `repo`.
    #[serde(default = "default_header")]
    pub header: String,

    #[serde(default = "default_fallback_full")]
    pub fallback_full: String,

    #[serde(default = "default_fallback_short")]
    pub fallback_short: String,

    #[serde(default = "default_fallback_tag")]
    pub fallback_tag: String,
}

fn default_repo() -> String {
    ".".to_string()
}

fn default_git() -> Vec<String> {
    vec!["git".to_string(), "git.cmd".to_string()]
}

fn default_header() -> String {
    "vic/drivers/shared/include/version.h".to_string()
}

fn default_fallback_full() -> String {
    "5.0.0-Alpha September 18, 2015".to_string()
}

fn default_fallback_short() -> String {
    "5.0.0-Alpha".to_string()
}

fn default_fallback_tag() -> String {
    "VIC.5.0.0".to_string()
}

impl Default for VersionSection {
    fn default() -> Self {
        Self {
            repo: default_repo(),
            git: default_git(),
            header: default_header(),
            fallback_full: default_fallback_full(),
            fallback_short: default_fallback_short(),
            fallback_tag: default_fallback_tag(),
        }
    }
}
