//! Reads the GitHub coordinate and current branch straight from `.git`.
//!
//! Both readers are best effort: a missing file or an unrecognised layout
//! produces empty strings instead of an error, so callers can fall back to
//! explicit values.

use log::debug;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::github::Coordinate;

static REMOTE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"url = (.+)").expect("remote url pattern is valid"));

const URL_PREFIXES: [&str; 2] = ["git@github.com:", "https://github.com/"];
const HEAD_REF_PREFIX: &str = "ref: refs/heads/";

/// Returns the owner and repo of the first remote url in `<workdir>/.git/config`.
///
/// Yields an empty [`Coordinate`] when the file cannot be read or holds no
/// usable url.
pub fn remote(workdir: impl AsRef<Path>) -> Coordinate {
    let path = workdir.as_ref().join(".git").join("config");
    debug!("loading git config: {}", path.display());

    match fs::read_to_string(&path) {
        Ok(config) => parse_remote(&config).unwrap_or_default(),
        Err(e) => {
            debug!("cannot read {}: {}", path.display(), e);
            Coordinate::default()
        }
    }
}

/// Extracts `owner/repo` from git config text.
pub fn parse_remote(config: &str) -> Option<Coordinate> {
    let url = REMOTE_URL_RE.captures(config)?.get(1)?.as_str().trim();
    debug!("found remote url: {}", url);

    let mut remote = url;
    for prefix in URL_PREFIXES {
        remote = remote.strip_prefix(prefix).unwrap_or(remote);
    }
    let remote = remote.strip_suffix(".git").unwrap_or(remote);
    debug!("used remote url: {}", remote);

    let mut parts = remote.split('/');
    let owner = parts.next()?;
    let repo = parts.next()?;
    Some(Coordinate::new(owner, repo))
}

/// Returns the branch checked out in `<workdir>/.git/HEAD`, or an empty string.
pub fn head(workdir: impl AsRef<Path>) -> String {
    let path = workdir.as_ref().join(".git").join("HEAD");
    debug!("loading git HEAD: {}", path.display());

    match fs::read_to_string(&path) {
        Ok(contents) => parse_head(&contents),
        Err(e) => {
            debug!("cannot read {}: {}", path.display(), e);
            String::new()
        }
    }
}

/// Takes the first line of HEAD text and drops the `ref: refs/heads/` prefix.
///
/// A detached HEAD has no prefix, so the commit id comes back unchanged.
pub fn parse_head(contents: &str) -> String {
    let first = contents.lines().next().unwrap_or_default();
    first.replace(HEAD_REF_PREFIX, "")
}
