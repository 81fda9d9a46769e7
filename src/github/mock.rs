use crate::error::{ReleaseError, Result};
use crate::github::{Coordinate, Release, ReleaseApi, ReleaseRequest};
use std::cell::RefCell;
use std::collections::VecDeque;

/// One recorded call against [MockReleaseApi].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    LatestRelease,
    ReleaseByTag(String),
    CreateRelease(ReleaseRequest),
    DeleteRelease(u64),
    DeleteRef(String),
}

/// Mock release API for testing without network access
///
/// Responses are queued per operation and consumed in order. An operation
/// with an empty queue succeeds with a synthesized value, so tests only
/// script the calls they care about.
#[derive(Default)]
pub struct MockReleaseApi {
    calls: RefCell<Vec<ApiCall>>,
    latest: RefCell<VecDeque<Result<Release>>>,
    by_tag: RefCell<VecDeque<Result<Release>>>,
    create: RefCell<VecDeque<Result<Release>>>,
    delete_release: RefCell<VecDeque<Result<()>>>,
    delete_ref: RefCell<VecDeque<Result<()>>>,
}

impl MockReleaseApi {
    /// Create a new mock with no scripted responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a release record the way GitHub would return it
    pub fn release(id: u64, tag: &str, prerelease: bool) -> Release {
        Release {
            id,
            tag_name: tag.to_string(),
            html_url: format!("https://github.com/owner/repo/releases/tag/{}", tag),
            prerelease,
            published_at: Some("2024-01-01T00:00:00+00:00".to_string()),
        }
    }

    /// The 422 GitHub answers with when a release for the tag exists
    pub fn tag_exists_error() -> ReleaseError {
        ReleaseError::api(
            422,
            "Validation Failed",
            vec![crate::error::FieldError::new("tag_name", "already_exists")],
        )
    }

    pub fn push_latest(&self, response: Result<Release>) {
        self.latest.borrow_mut().push_back(response);
    }

    pub fn push_by_tag(&self, response: Result<Release>) {
        self.by_tag.borrow_mut().push_back(response);
    }

    pub fn push_create(&self, response: Result<Release>) {
        self.create.borrow_mut().push_back(response);
    }

    pub fn push_delete_release(&self, response: Result<()>) {
        self.delete_release.borrow_mut().push_back(response);
    }

    pub fn push_delete_ref(&self, response: Result<()>) {
        self.delete_ref.borrow_mut().push_back(response);
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl ReleaseApi for MockReleaseApi {
    fn latest_release(&self, _coordinate: &Coordinate) -> Result<Release> {
        self.record(ApiCall::LatestRelease);
        self.latest
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::release(1, "v0.1.0", false)))
    }

    fn release_by_tag(&self, _coordinate: &Coordinate, tag: &str) -> Result<Release> {
        self.record(ApiCall::ReleaseByTag(tag.to_string()));
        self.by_tag
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::release(1, tag, true)))
    }

    fn create_release(
        &self,
        _coordinate: &Coordinate,
        request: &ReleaseRequest,
    ) -> Result<Release> {
        self.record(ApiCall::CreateRelease(request.clone()));
        self.create
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::release(2, &request.tag_name, request.prerelease)))
    }

    fn delete_release(&self, _coordinate: &Coordinate, release_id: u64) -> Result<()> {
        self.record(ApiCall::DeleteRelease(release_id));
        self.delete_release.borrow_mut().pop_front().unwrap_or(Ok(()))
    }

    fn delete_ref(&self, _coordinate: &Coordinate, reference: &str) -> Result<()> {
        self.record(ApiCall::DeleteRef(reference.to_string()));
        self.delete_ref.borrow_mut().pop_front().unwrap_or(Ok(()))
    }
}
