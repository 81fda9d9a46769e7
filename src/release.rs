//! Release creation against a [ReleaseApi].
//!
//! [Publisher] holds the logic and works with any API implementation. The
//! free functions at the bottom are the token-level entry points: each call
//! builds its own [GitHubClient].

use log::{debug, info};

use crate::error::{ReleaseError, Result};
use crate::github::{Coordinate, GitHubClient, Release, ReleaseApi, ReleaseRequest};
use crate::version;

const TAG_NAME_FIELD: &str = "tag_name";
const ALREADY_EXISTS_CODE: &str = "already_exists";

/// True iff `err` is a structured API error reporting that the tag is taken.
pub fn is_tag_name_already_exists(err: &ReleaseError) -> bool {
    err.field_errors().is_some_and(|errors| {
        errors
            .iter()
            .any(|e| e.field == TAG_NAME_FIELD && e.code == ALREADY_EXISTS_CODE)
    })
}

/// Creates releases for one repository.
pub struct Publisher<A> {
    api: A,
    coordinate: Coordinate,
}

impl<A: ReleaseApi> Publisher<A> {
    pub fn new(api: A, coordinate: Coordinate) -> Self {
        Publisher { api, coordinate }
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// Returns the latest release's tag bumped by one patch version.
    ///
    /// `v1.2.3` becomes `v1.2.4`; a tag without the `v` prefix stays without it.
    pub fn next_patch_version(&self) -> Result<String> {
        debug!("fetching latest release of {}", self.coordinate);
        let latest = self.api.latest_release(&self.coordinate)?;
        debug!(
            "found {} published at {}",
            latest.tag_name,
            latest.published_at.as_deref().unwrap_or("unknown")
        );
        version::next_patch_tag(&latest.tag_name)
    }

    /// Creates a normal release. A taken tag is reported as-is.
    pub fn create_release(&self, branch: &str, tag: &str) -> Result<Release> {
        let request = ReleaseRequest::release(tag, branch);
        debug!(
            "creating release {} for {} branch: {}",
            tag, self.coordinate, branch
        );
        let release = self.api.create_release(&self.coordinate, &request)?;
        info!("Successfully created release: {}", release.html_url);
        Ok(release)
    }

    /// Creates a pre-release.
    ///
    /// With `force`, a tag-exists rejection is answered by deleting the
    /// release and its tag ref and creating once more. Any other failure,
    /// and any failure without `force`, is returned unchanged.
    pub fn create_prerelease(&self, branch: &str, tag: &str, force: bool) -> Result<Release> {
        let request = ReleaseRequest::prerelease(tag, branch);
        debug!(
            "creating pre-release {} for {} branch: {}",
            tag, self.coordinate, branch
        );

        let release = match self.api.create_release(&self.coordinate, &request) {
            Ok(release) => release,
            Err(err) if force && is_tag_name_already_exists(&err) => {
                debug!("tag name {} already exists, force to delete it..", tag);
                self.delete_release_by_tag(tag)?;
                debug!(
                    "creating pre-release {} again for {} branch: {}",
                    tag, self.coordinate, branch
                );
                self.api.create_release(&self.coordinate, &request)?
            }
            Err(err) => return Err(err),
        };

        info!("Successfully created pre-release: {}", release.html_url);
        Ok(release)
    }

    /// Removes the release for `tag` and then the tag ref itself.
    fn delete_release_by_tag(&self, tag: &str) -> Result<()> {
        let existing = self.api.release_by_tag(&self.coordinate, tag)?;
        self.api.delete_release(&self.coordinate, existing.id)?;
        self.api
            .delete_ref(&self.coordinate, &format!("tags/{}", tag))
    }
}

/// Next patch tag for `coordinate`, or `None` when automation is disabled.
///
/// An empty token, owner or repo means "disabled": nothing is requested and
/// no error is raised.
pub fn find_next_release_version(token: &str, coordinate: &Coordinate) -> Result<Option<String>> {
    if token.is_empty() || coordinate.is_empty() {
        debug!("release automation disabled: missing token, owner or repo");
        return Ok(None);
    }
    let client = GitHubClient::with_token(token)?;
    Publisher::new(client, coordinate.clone())
        .next_patch_version()
        .map(Some)
}

/// Creates a release on `branch` tagged `tag`.
pub fn create_release(
    token: &str,
    coordinate: &Coordinate,
    branch: &str,
    tag: &str,
) -> Result<Release> {
    let client = GitHubClient::with_token(token)?;
    Publisher::new(client, coordinate.clone()).create_release(branch, tag)
}

/// Creates a pre-release on `branch` tagged `tag`, recreating it when `force`.
pub fn create_prerelease(
    token: &str,
    coordinate: &Coordinate,
    branch: &str,
    tag: &str,
    force: bool,
) -> Result<Release> {
    let client = GitHubClient::with_token(token)?;
    Publisher::new(client, coordinate.clone()).create_prerelease(branch, tag, force)
}
