//! Per-repository sweep
//!
//! One invocation handles a single checkout: resolve its remote target,
//! match open pull requests by title, approve each match, and optionally
//! merge. Failures stay contained in the returned outcome so the
//! surrounding batch keeps going.

use crate::api::PullRequestApi;
use crate::batch::runner::BatchOutcome;
use crate::error::Result;
use crate::repo::resolve_target;
use crate::types::{MergeGate, PullRequest, RemoteTarget, RepoOutcome, RequestOutcome, StepStatus};
use std::path::Path;
use tracing::{debug, warn};

/// Options for a sweep, fixed across the whole batch
#[derive(Debug, Clone)]
pub struct SweepOptions {
    /// Exact title a pull request must carry to be acted on
    pub title: String,
    /// Whether matched pull requests are merged after approval
    pub merge: bool,
    /// Policy gating merge on the approve outcome
    pub gate: MergeGate,
    /// Remote whose URL identifies the repository on the server
    pub remote: String,
    /// List and match only; perform no state-changing calls
    pub dry_run: bool,
}

/// Filter `requests` down to those whose title equals `title` exactly,
/// preserving their original order
///
/// No normalization is applied: matching is case-sensitive and whole-string.
#[must_use]
pub fn match_requests(requests: Vec<PullRequest>, title: &str) -> Vec<PullRequest> {
    requests.into_iter().filter(|r| r.title == title).collect()
}

/// Sweep a single checkout, containing any failure in the outcome
pub async fn sweep_repo(
    path: &Path,
    api: &dyn PullRequestApi,
    options: &SweepOptions,
) -> RepoOutcome {
    let label = path.display().to_string();

    let target = match resolve_target(path, &options.remote) {
        Ok(target) => target,
        Err(e) => {
            warn!(repo = %label, error = %e, "skipping repository");
            return RepoOutcome::failed(label, e);
        }
    };

    match sweep_target(&target, api, options).await {
        Ok(requests) => RepoOutcome {
            repo: label,
            requests,
            error: None,
        },
        Err(e) => {
            warn!(repo = %label, error = %e, "failed to list pull requests");
            RepoOutcome::failed(label, e)
        }
    }
}

/// Act on every matching open pull request of an already-resolved target
///
/// Returns one record per match; an `Err` is only produced when the listing
/// itself fails, before any action ran.
pub async fn sweep_target(
    target: &RemoteTarget,
    api: &dyn PullRequestApi,
    options: &SweepOptions,
) -> Result<Vec<RequestOutcome>> {
    let open = api.list_open_requests(target).await?;
    let matched = match_requests(open, &options.title);
    debug!(repo = %target, matched = matched.len(), "matched pull requests");

    let mut records = Vec::with_capacity(matched.len());
    for request in &matched {
        records.push(run_request(target, request, api, options).await);
    }
    Ok(records)
}

/// Approve one matched request and, when enabled and allowed by the gate,
/// merge it
async fn run_request(
    target: &RemoteTarget,
    request: &PullRequest,
    api: &dyn PullRequestApi,
    options: &SweepOptions,
) -> RequestOutcome {
    let mut record = RequestOutcome::new(request);

    if options.dry_run {
        return record;
    }

    record.approve = match api.approve(target, request.id).await {
        Ok(()) => StepStatus::Done,
        Err(e) => StepStatus::Failed(e.to_string()),
    };

    if !options.merge {
        return record;
    }

    let gate_open = match options.gate {
        MergeGate::RequireApproval => record.approve.is_done(),
        MergeGate::BestEffort => true,
    };
    if !gate_open {
        debug!(repo = %target, id = request.id, "approve failed, merge not attempted");
        return record;
    }

    record.merge = match api.merge(target, request.id, request.version).await {
        Ok(()) => StepStatus::Done,
        Err(e) => StepStatus::Failed(e.to_string()),
    };

    record
}

impl BatchOutcome for RepoOutcome {
    fn panicked(detail: String) -> Self {
        Self::failed("<unknown>", format!("worker panic: {detail}"))
    }
}
