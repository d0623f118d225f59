//! Remote pull request API
//!
//! A small trait seam over the hosting server's REST surface so the sweep
//! logic can be driven against a mock in tests.

mod bitbucket;

pub use bitbucket::BitbucketService;

use crate::error::Result;
use crate::types::{PullRequest, RemoteTarget};
use async_trait::async_trait;

/// Operations the sweep needs from the hosting server
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// List all open pull requests for a repository, following pagination
    async fn list_open_requests(&self, target: &RemoteTarget) -> Result<Vec<PullRequest>>;

    /// Record the configured identity's approval on a pull request
    ///
    /// Repeating the call is harmless; the server treats the participant
    /// status update as idempotent.
    async fn approve(&self, target: &RemoteTarget, id: u64) -> Result<()>;

    /// Merge a pull request, passing `version` for optimistic concurrency
    ///
    /// A stale `version` is rejected by the server and surfaced as
    /// [`Error::StaleVersion`](crate::error::Error::StaleVersion).
    async fn merge(&self, target: &RemoteTarget, id: u64, version: u64) -> Result<()>;
}
