// src/version/git.rs

use std::path::Path;

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::CommandBackend;
use crate::version::VersionInfo;

const DESCRIBE_ARGS: &[&str] = &["describe", "--abbrev=4", "--dirty", "--always", "--tags"];
const COMMIT_DATE_ARGS: &[&str] = &["log", "-1", "--format=%cd"];
const NEAREST_TAG_ARGS: &[&str] = &["describe", "--abbrev=0"];

/// Query git for the version of the checkout at `repo`.
///
/// Each entry of `candidates` (e.g. `git`, `git.cmd`) is tried in turn until
/// one can describe the checkout. When none can (no git, not a repository),
/// `fallback` is returned.
///
/// - `short`: `git describe --abbrev=4 --dirty --always --tags`
/// - `full`: `short` followed by the last commit date
/// - `tag`: nearest tag, or `short` when the history has no tags
pub async fn git_version(
    backend: &dyn CommandBackend,
    repo: &Path,
    candidates: &[String],
    fallback: &VersionInfo,
) -> VersionInfo {
    for git in candidates {
        let rev = match query(backend, git, repo, DESCRIBE_ARGS).await {
            Ok(Some(rev)) if !rev.is_empty() => rev,
            Ok(_) => {
                debug!(git = %git, "git describe failed");
                continue;
            }
            Err(err) => {
                debug!(git = %git, error = %err, "git candidate unavailable");
                continue;
            }
        };

        let date = query(backend, git, repo, COMMIT_DATE_ARGS)
            .await
            .ok()
            .flatten()
            .filter(|d| !d.is_empty());
        let tag = query(backend, git, repo, NEAREST_TAG_ARGS)
            .await
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| rev.clone());

        let full = match date {
            Some(date) => format!("{rev} {date}"),
            None => rev.clone(),
        };

        info!(git = %git, short = %rev, tag = %tag, "resolved version from git");
        return VersionInfo {
            full,
            short: rev,
            tag,
        };
    }

    warn!(
        repo = %repo.display(),
        "couldn't get git revision, using generic version string"
    );
    fallback.clone()
}

/// Run `git -C <repo> <args>`; `Ok(None)` when git ran but exited nonzero.
async fn query(
    backend: &dyn CommandBackend,
    git: &str,
    repo: &Path,
    args: &[&str],
) -> Result<Option<String>> {
    let mut argv = vec![
        git.to_string(),
        "-C".to_string(),
        repo.display().to_string(),
    ];
    argv.extend(args.iter().map(|a| a.to_string()));

    let output = backend.execute(&argv).await?;
    if output.exit_status != 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
}
