//! Main workflow orchestration logic
//!
//! Keeps argument parsing in `main.rs` and the release flow here, so the
//! flow can be driven programmatically (and against a mock API) without clap.

use anyhow::{bail, Context};
use log::{debug, warn};
use std::path::Path;

use crate::cli::{Args, Command, ReleaseArgs};
use crate::config::{load_config, RemoteConfig};
use crate::error::Result;
use crate::github::{Coordinate, GitHubClient, Release, ReleaseApi};
use crate::release::{find_next_release_version, Publisher};
use crate::{remote, ui};

/// Arguments for the release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseWorkflowArgs {
    /// Branch the release targets
    pub branch: String,

    /// Explicit tag; the next patch version is used when `None`
    pub tag: Option<String>,

    pub prerelease: bool,

    /// Recreate a pre-release whose tag already exists
    pub force: bool,

    /// Preview mode - resolve the tag but create nothing
    pub dry_run: bool,
}

/// Result of a release workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub tag: String,
    pub branch: String,
    /// `None` in dry-run mode
    pub release: Option<Release>,
}

/// Picks owner and repo: command line first, then config, then `.git/config`.
pub fn resolve_coordinate(
    workdir: &Path,
    owner: Option<&str>,
    repo: Option<&str>,
    overrides: &RemoteConfig,
) -> Coordinate {
    let detected = remote::remote(workdir);
    let owner = owner
        .map(str::to_string)
        .or_else(|| overrides.owner.clone())
        .unwrap_or(detected.owner);
    let repo = repo
        .map(str::to_string)
        .or_else(|| overrides.repo.clone())
        .unwrap_or(detected.repo);
    Coordinate::new(owner, repo)
}

/// Picks the target branch: command line first, then `.git/HEAD`.
pub fn resolve_branch(workdir: &Path, branch: Option<&str>) -> String {
    branch
        .map(str::to_string)
        .unwrap_or_else(|| remote::head(workdir))
}

/// Release workflow
///
/// 1. Use the given tag or compute the next patch version
/// 2. Unless dry-running, create the release or pre-release
pub fn run_release_workflow<A: ReleaseApi>(
    publisher: &Publisher<A>,
    args: &ReleaseWorkflowArgs,
) -> Result<WorkflowResult> {
    let tag = match &args.tag {
        Some(tag) => tag.clone(),
        None => publisher.next_patch_version()?,
    };
    debug!("resolved tag {} for {}", tag, publisher.coordinate());

    if args.dry_run {
        return Ok(WorkflowResult {
            tag,
            branch: args.branch.clone(),
            release: None,
        });
    }

    let release = if args.prerelease {
        publisher.create_prerelease(&args.branch, &tag, args.force)?
    } else {
        publisher.create_release(&args.branch, &tag)?
    };

    Ok(WorkflowResult {
        tag,
        branch: args.branch.clone(),
        release: Some(release),
    })
}

/// Runs one parsed command line.
pub fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref()).context("Error loading config")?;
    let coordinate = resolve_coordinate(
        &args.workdir,
        args.owner.as_deref(),
        args.repo.as_deref(),
        &config.remote,
    );
    let token = config.resolve_token(args.token.as_deref());

    match &args.command {
        Command::Remote => {
            ui::display_remote(&coordinate, &remote::head(&args.workdir));
        }
        Command::NextVersion => match find_next_release_version(&token, &coordinate)
            .with_context(|| format!("Failed to find next version of {}", coordinate))?
        {
            Some(next) => println!("{}", next),
            None => warn!("release automation disabled: token, owner or repo is missing"),
        },
        Command::Release(release) => {
            publish(&args.workdir, &token, coordinate, release, false, false)?;
        }
        Command::Prerelease(pre) => {
            let force = pre.force || config.prerelease.force;
            publish(&args.workdir, &token, coordinate, &pre.release, true, force)?;
        }
    }

    Ok(())
}

fn publish(
    workdir: &Path,
    token: &str,
    coordinate: Coordinate,
    release: &ReleaseArgs,
    prerelease: bool,
    force: bool,
) -> anyhow::Result<()> {
    if coordinate.is_empty() {
        bail!("Cannot determine repository owner/repo; pass --owner and --repo");
    }
    if token.is_empty() {
        bail!("GitHub token not provided; pass --token or set GITHUB_TOKEN");
    }
    let branch = resolve_branch(workdir, release.branch.as_deref());
    if branch.is_empty() {
        bail!("Cannot determine target branch; pass --branch");
    }

    let client = GitHubClient::with_token(token)?;
    let publisher = Publisher::new(client, coordinate);
    let args = ReleaseWorkflowArgs {
        branch,
        tag: release.tag.clone(),
        prerelease,
        force,
        dry_run: release.dry_run,
    };

    ui::display_status(&format!(
        "Publishing to {} from branch {}",
        publisher.coordinate(),
        args.branch
    ));
    let result = run_release_workflow(&publisher, &args)
        .with_context(|| format!("Failed to publish {}", publisher.coordinate()))?;

    match &result.release {
        Some(created) => ui::display_release(created),
        None => {
            let kind = if prerelease { "pre-release" } else { "release" };
            ui::display_status("Dry run:");
            ui::display_success(&format!(
                "  Would create {} {} on branch {}{}",
                kind,
                result.tag,
                result.branch,
                if force { " (force)" } else { "" }
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{ApiCall, MockReleaseApi, ReleaseRequest};

    fn args(tag: Option<&str>, prerelease: bool, dry_run: bool) -> ReleaseWorkflowArgs {
        ReleaseWorkflowArgs {
            branch: "main".to_string(),
            tag: tag.map(str::to_string),
            prerelease,
            force: false,
            dry_run,
        }
    }

    #[test]
    fn test_workflow_uses_next_patch_version() {
        let api = MockReleaseApi::new();
        api.push_latest(Ok(MockReleaseApi::release(1, "v0.3.9", false)));
        let publisher = Publisher::new(&api, Coordinate::new("alice", "myrepo"));

        let result = run_release_workflow(&publisher, &args(None, false, false)).unwrap();

        assert_eq!(result.tag, "v0.3.10");
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::LatestRelease,
                ApiCall::CreateRelease(ReleaseRequest::release("v0.3.10", "main")),
            ]
        );
    }

    #[test]
    fn test_workflow_explicit_tag_skips_lookup() {
        let api = MockReleaseApi::new();
        let publisher = Publisher::new(&api, Coordinate::new("alice", "myrepo"));

        let result =
            run_release_workflow(&publisher, &args(Some("nightly"), true, false)).unwrap();

        assert_eq!(result.tag, "nightly");
        assert!(result.release.unwrap().prerelease);
        assert_eq!(
            api.calls(),
            vec![ApiCall::CreateRelease(ReleaseRequest::prerelease(
                "nightly", "main"
            ))]
        );
    }

    #[test]
    fn test_workflow_dry_run_creates_nothing() {
        let api = MockReleaseApi::new();
        let publisher = Publisher::new(&api, Coordinate::new("alice", "myrepo"));

        let result = run_release_workflow(&publisher, &args(None, true, true)).unwrap();

        assert_eq!(result.tag, "v0.1.1");
        assert_eq!(result.release, None);
        assert_eq!(api.calls(), vec![ApiCall::LatestRelease]);
    }

    #[test]
    fn test_resolve_coordinate_precedence() {
        let missing = Path::new("/nonexistent/gh-release/checkout");
        let overrides = RemoteConfig {
            owner: Some("config-owner".to_string()),
            repo: Some("config-repo".to_string()),
        };

        let coordinate = resolve_coordinate(missing, Some("cli-owner"), None, &overrides);
        assert_eq!(coordinate, Coordinate::new("cli-owner", "config-repo"));

        let coordinate = resolve_coordinate(missing, None, None, &RemoteConfig::default());
        assert!(coordinate.is_empty());
    }

    #[test]
    fn test_resolve_branch_explicit() {
        let missing = Path::new("/nonexistent/gh-release/checkout");
        assert_eq!(resolve_branch(missing, Some("release/1.x")), "release/1.x");
        assert_eq!(resolve_branch(missing, None), "");
    }
}
