//! Mock pull request API for testing
//!
//! These are test utilities - not all may be used by every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use pr_sweep::api::PullRequestApi;
use pr_sweep::error::{Error, Result};
use pr_sweep::types::{PullRequest, RemoteTarget};
use std::collections::HashMap;
use std::sync::Mutex;

/// Call record for `approve`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveCall {
    pub target: String,
    pub id: u64,
}

/// Call record for `merge`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub target: String,
    pub id: u64,
    pub version: u64,
}

/// Simple mock API for driving the sweep in tests
///
/// This implements `PullRequestApi` by hand rather than via a mocking
/// framework, which keeps the failure-injection and call-ordering checks
/// straightforward.
///
/// Features:
/// - Configurable list responses per target
/// - Call tracking for verification, including a combined ordered log
/// - Error injection for failure path testing
pub struct MockRequestApi {
    list_responses: Mutex<HashMap<String, Vec<PullRequest>>>,
    // Call tracking
    list_calls: Mutex<Vec<String>>,
    approve_calls: Mutex<Vec<ApproveCall>>,
    merge_calls: Mutex<Vec<MergeCall>>,
    /// Ordered log of state-changing calls, for sequencing assertions
    ops: Mutex<Vec<String>>,
    // Error injection
    error_on_list: Mutex<Option<String>>,
    error_on_approve: Mutex<Option<String>>,
    error_on_merge: Mutex<Option<String>>,
}

impl MockRequestApi {
    /// Create a new mock with no responses configured
    pub fn new() -> Self {
        Self {
            list_responses: Mutex::new(HashMap::new()),
            list_calls: Mutex::new(Vec::new()),
            approve_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            ops: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
            error_on_approve: Mutex::new(None),
            error_on_merge: Mutex::new(None),
        }
    }

    /// Set the open pull requests returned for `target`
    pub fn set_list_response(&self, target: &RemoteTarget, requests: Vec<PullRequest>) {
        self.list_responses
            .lock()
            .unwrap()
            .insert(target.to_string(), requests);
    }

    // === Error injection methods ===

    /// Make `list_open_requests` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `approve` return an error
    pub fn fail_approve(&self, msg: &str) {
        *self.error_on_approve.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `merge` return an error
    pub fn fail_merge(&self, msg: &str) {
        *self.error_on_merge.lock().unwrap() = Some(msg.to_string());
    }

    // === Call accessors ===

    /// Targets passed to `list_open_requests`, in order
    pub fn list_calls(&self) -> Vec<String> {
        self.list_calls.lock().unwrap().clone()
    }

    /// `approve` calls, in order
    pub fn approve_calls(&self) -> Vec<ApproveCall> {
        self.approve_calls.lock().unwrap().clone()
    }

    /// `merge` calls, in order
    pub fn merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// Combined ordered log of state-changing calls
    pub fn ops(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }
}

impl Default for MockRequestApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PullRequestApi for MockRequestApi {
    async fn list_open_requests(&self, target: &RemoteTarget) -> Result<Vec<PullRequest>> {
        self.list_calls.lock().unwrap().push(target.to_string());
        if let Some(msg) = self.error_on_list.lock().unwrap().clone() {
            return Err(Error::Api(msg));
        }
        Ok(self
            .list_responses
            .lock()
            .unwrap()
            .get(&target.to_string())
            .cloned()
            .unwrap_or_default())
    }

    async fn approve(&self, target: &RemoteTarget, id: u64) -> Result<()> {
        self.approve_calls.lock().unwrap().push(ApproveCall {
            target: target.to_string(),
            id,
        });
        self.ops.lock().unwrap().push(format!("approve {target}#{id}"));
        if let Some(msg) = self.error_on_approve.lock().unwrap().clone() {
            return Err(Error::Api(msg));
        }
        Ok(())
    }

    async fn merge(&self, target: &RemoteTarget, id: u64, version: u64) -> Result<()> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            target: target.to_string(),
            id,
            version,
        });
        self.ops
            .lock()
            .unwrap()
            .push(format!("merge {target}#{id}@{version}"));
        if let Some(msg) = self.error_on_merge.lock().unwrap().clone() {
            return Err(Error::Api(msg));
        }
        Ok(())
    }
}
