//! GitHub release API abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of GitHub
//! REST calls gh-release needs, allowing the release logic to run against the
//! real API or against a scripted mock in tests.
//!
//! # Overview
//!
//! - [client::GitHubClient]: token-authenticated implementation backed by `octocrab`
//! - [mock::MockReleaseApi]: records calls and replays scripted responses
//!
//! ```rust
//! # use gh_release::github::{ReleaseApi, Coordinate};
//! # fn example<A: ReleaseApi>(api: &A) -> gh_release::Result<()> {
//! let coordinate = Coordinate::new("alice", "myrepo");
//! let latest = api.latest_release(&coordinate)?;
//! println!("latest tag: {}", latest.tag_name);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod mock;

pub use client::GitHubClient;
pub use mock::{ApiCall, MockReleaseApi};

use crate::error::Result;

/// Identifies a remote repository as `owner/repo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coordinate {
    pub owner: String,
    pub repo: String,
}

impl Coordinate {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Coordinate {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// True when either part is missing; no request may be made for it.
    pub fn is_empty(&self) -> bool {
        self.owner.is_empty() || self.repo.is_empty()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Payload for creating a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    pub tag_name: String,
    pub target_branch: String,
    pub prerelease: bool,
}

impl ReleaseRequest {
    pub fn release(tag_name: impl Into<String>, target_branch: impl Into<String>) -> Self {
        ReleaseRequest {
            tag_name: tag_name.into(),
            target_branch: target_branch.into(),
            prerelease: false,
        }
    }

    pub fn prerelease(tag_name: impl Into<String>, target_branch: impl Into<String>) -> Self {
        ReleaseRequest {
            prerelease: true,
            ..Self::release(tag_name, target_branch)
        }
    }
}

/// A release record as returned by GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    pub html_url: String,
    pub prerelease: bool,
    pub published_at: Option<String>,
}

/// GitHub release operations used by gh-release.
///
/// Every method blocks until the request completes. Implementations map
/// structured API rejections to [crate::error::ReleaseError::Api] and every
/// other failure to [crate::error::ReleaseError::Transport], since the
/// pre-release recovery path depends on telling the two apart.
pub trait ReleaseApi {
    /// Fetch the latest published (non-draft, non-prerelease) release.
    fn latest_release(&self, coordinate: &Coordinate) -> Result<Release>;

    /// Fetch a release by its tag name.
    fn release_by_tag(&self, coordinate: &Coordinate, tag: &str) -> Result<Release>;

    /// Create a release. Fails with a `tag_name`/`already_exists` field error
    /// when the tag is taken.
    fn create_release(&self, coordinate: &Coordinate, request: &ReleaseRequest)
        -> Result<Release>;

    /// Delete a release record by id. The tag ref is left in place.
    fn delete_release(&self, coordinate: &Coordinate, release_id: u64) -> Result<()>;

    /// Delete a git reference such as `tags/v1.2.3`.
    fn delete_ref(&self, coordinate: &Coordinate, reference: &str) -> Result<()>;
}

impl<A: ReleaseApi + ?Sized> ReleaseApi for &A {
    fn latest_release(&self, coordinate: &Coordinate) -> Result<Release> {
        (**self).latest_release(coordinate)
    }

    fn release_by_tag(&self, coordinate: &Coordinate, tag: &str) -> Result<Release> {
        (**self).release_by_tag(coordinate, tag)
    }

    fn create_release(
        &self,
        coordinate: &Coordinate,
        request: &ReleaseRequest,
    ) -> Result<Release> {
        (**self).create_release(coordinate, request)
    }

    fn delete_release(&self, coordinate: &Coordinate, release_id: u64) -> Result<()> {
        (**self).delete_release(coordinate, release_id)
    }

    fn delete_ref(&self, coordinate: &Coordinate, reference: &str) -> Result<()> {
        (**self).delete_ref(coordinate, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_display() {
        assert_eq!(Coordinate::new("alice", "myrepo").to_string(), "alice/myrepo");
    }

    #[test]
    fn test_coordinate_is_empty() {
        assert!(Coordinate::default().is_empty());
        assert!(Coordinate::new("", "repo").is_empty());
        assert!(Coordinate::new("owner", "").is_empty());
        assert!(!Coordinate::new("owner", "repo").is_empty());
    }

    #[test]
    fn test_release_request_flags() {
        let release = ReleaseRequest::release("v1.0.0", "main");
        assert!(!release.prerelease);

        let pre = ReleaseRequest::prerelease("v1.0.1", "develop");
        assert!(pre.prerelease);
        assert_eq!(pre.tag_name, "v1.0.1");
        assert_eq!(pre.target_branch, "develop");
    }
}
