use crate::error::{ReleaseError, Result};
use crate::github::{Coordinate, Release, ReleaseApi, ReleaseRequest};
use log::debug;
use octocrab::params::repos::Reference;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use tokio::runtime::Runtime;

/// Token-authenticated GitHub client with a blocking interface.
///
/// Owns a single-threaded tokio runtime and drives each octocrab request to
/// completion on it, so one client serves one caller thread.
pub struct GitHubClient {
    runtime: Runtime,
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Build a client that authenticates every request with `token`.
    pub fn with_token(token: impl Into<String>) -> Result<Self> {
        Self::connect(token.into(), None)
    }

    /// Like [GitHubClient::with_token], against another API root such as a
    /// GitHub Enterprise server.
    pub fn with_base_uri(token: impl Into<String>, base_uri: &str) -> Result<Self> {
        Self::connect(token.into(), Some(base_uri))
    }

    fn connect(token: String, base_uri: Option<&str>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ReleaseError::client(format!("cannot start runtime: {}", e)))?;

        let octocrab = {
            let _guard = runtime.enter();
            // Every request goes out once; the only retry is the pre-release recreate.
            let mut builder = Octocrab::builder()
                .personal_token(token)
                .add_retry_config(RetryConfig::None);
            if let Some(uri) = base_uri {
                builder = builder
                    .base_uri(uri)
                    .map_err(|e| ReleaseError::client(format!("invalid base uri: {}", e)))?;
            }
            builder
                .build()
                .map_err(|e| ReleaseError::client(e.to_string()))?
        };

        Ok(GitHubClient { runtime, octocrab })
    }
}

fn to_release(release: octocrab::models::repos::Release) -> Release {
    Release {
        id: release.id.0,
        tag_name: release.tag_name,
        html_url: release.html_url.to_string(),
        prerelease: release.prerelease,
        published_at: release.published_at.map(|at| at.to_rfc3339()),
    }
}

/// Map `tags/<name>` and `heads/<name>` onto octocrab's typed reference.
fn parse_reference(reference: &str) -> Result<Reference> {
    if let Some(tag) = reference.strip_prefix("tags/") {
        Ok(Reference::Tag(tag.to_string()))
    } else if let Some(branch) = reference.strip_prefix("heads/") {
        Ok(Reference::Branch(branch.to_string()))
    } else {
        Err(ReleaseError::transport(format!(
            "unsupported reference '{}', expected tags/<name> or heads/<name>",
            reference
        )))
    }
}

impl ReleaseApi for GitHubClient {
    fn latest_release(&self, coordinate: &Coordinate) -> Result<Release> {
        debug!("GET latest release of {}", coordinate);
        let release = self.runtime.block_on(
            self.octocrab
                .repos(&coordinate.owner, &coordinate.repo)
                .releases()
                .get_latest(),
        )?;
        Ok(to_release(release))
    }

    fn release_by_tag(&self, coordinate: &Coordinate, tag: &str) -> Result<Release> {
        debug!("GET release {} of {}", tag, coordinate);
        let release = self.runtime.block_on(
            self.octocrab
                .repos(&coordinate.owner, &coordinate.repo)
                .releases()
                .get_by_tag(tag),
        )?;
        Ok(to_release(release))
    }

    fn create_release(
        &self,
        coordinate: &Coordinate,
        request: &ReleaseRequest,
    ) -> Result<Release> {
        debug!(
            "POST release {} (prerelease: {}) to {}",
            request.tag_name, request.prerelease, coordinate
        );
        let release = self.runtime.block_on(async {
            self.octocrab
                .repos(&coordinate.owner, &coordinate.repo)
                .releases()
                .create(&request.tag_name)
                .target_commitish(&request.target_branch)
                .prerelease(request.prerelease)
                .send()
                .await
        })?;
        Ok(to_release(release))
    }

    fn delete_release(&self, coordinate: &Coordinate, release_id: u64) -> Result<()> {
        debug!("DELETE release {} of {}", release_id, coordinate);
        self.runtime.block_on(
            self.octocrab
                .repos(&coordinate.owner, &coordinate.repo)
                .releases()
                .delete(release_id),
        )?;
        Ok(())
    }

    fn delete_ref(&self, coordinate: &Coordinate, reference: &str) -> Result<()> {
        let typed = parse_reference(reference)?;
        debug!("DELETE ref {} of {}", reference, coordinate);
        self.runtime.block_on(
            self.octocrab
                .repos(&coordinate.owner, &coordinate.repo)
                .delete_ref(&typed),
        )?;
        Ok(())
    }
}
