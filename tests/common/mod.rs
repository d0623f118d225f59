//! Shared test utilities

#![allow(dead_code)]

mod mock_api;

pub use mock_api::{ApproveCall, MergeCall, MockRequestApi};

use pr_sweep::types::{PullRequest, RemoteTarget};

/// Target used by most tests
pub fn demo_target() -> RemoteTarget {
    RemoteTarget {
        project: "PROJ".to_string(),
        slug: "repo".to_string(),
    }
}

/// Build a pull request fixture
pub fn make_request(id: u64, version: u64, title: &str) -> PullRequest {
    PullRequest {
        id,
        version,
        title: title.to_string(),
        url: None,
        updated_at: None,
    }
}
