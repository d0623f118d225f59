//! Core types for pr-sweep

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository on the hosting server, addressed as project + slug
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteTarget {
    /// Project (or namespace) key
    pub project: String,
    /// Repository slug within the project
    pub slug: String,
}

impl std::fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.project, self.slug)
    }
}

/// An open pull request on the remote system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// Numeric pull request id
    pub id: u64,
    /// Version stamp used for optimistic concurrency on merge
    pub version: u64,
    /// Pull request title
    pub title: String,
    /// Web URL, if the server provided one
    pub url: Option<String>,
    /// Last update time, if the server provided one
    pub updated_at: Option<DateTime<Utc>>,
}

/// Policy gating the merge step on the outcome of the approve step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeGate {
    /// Merge only when the approve call succeeded
    #[default]
    RequireApproval,
    /// Attempt the merge regardless of the approve outcome
    BestEffort,
}

impl std::fmt::Display for MergeGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequireApproval => write!(f, "require-approval"),
            Self::BestEffort => write!(f, "best-effort"),
        }
    }
}

/// Outcome of a single remote action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// The call succeeded
    Done,
    /// The call failed; the reason is kept for reporting
    Failed(String),
    /// The step was not attempted
    Skipped,
}

impl StepStatus {
    /// Whether the call succeeded
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Whether the call was attempted and failed
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// What happened to one matched pull request
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    /// Pull request id
    pub id: u64,
    /// Pull request title (for display)
    pub title: String,
    /// Web URL, if known
    pub url: Option<String>,
    /// Outcome of the approve step
    pub approve: StepStatus,
    /// Outcome of the merge step
    pub merge: StepStatus,
}

impl RequestOutcome {
    /// Start a record for `request` with both steps unattempted
    #[must_use]
    pub fn new(request: &PullRequest) -> Self {
        Self {
            id: request.id,
            title: request.title.clone(),
            url: request.url.clone(),
            approve: StepStatus::Skipped,
            merge: StepStatus::Skipped,
        }
    }

    /// Whether any attempted step failed
    #[must_use]
    pub const fn failed(&self) -> bool {
        self.approve.is_failed() || self.merge.is_failed()
    }
}

/// Result of sweeping one repository
#[derive(Debug, Clone, Default)]
pub struct RepoOutcome {
    /// The repository path as submitted to the batch
    pub repo: String,
    /// Outcomes for each matched pull request
    pub requests: Vec<RequestOutcome>,
    /// Fatal error that stopped this repository before any actions ran
    pub error: Option<String>,
}

impl RepoOutcome {
    /// An empty outcome for `repo`
    #[must_use]
    pub fn new(repo: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            ..Default::default()
        }
    }

    /// An outcome recording that `repo` failed before any actions ran
    #[must_use]
    pub fn failed(repo: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self {
            repo: repo.into(),
            requests: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    /// Whether this repository completed without any failure
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none() && !self.requests.iter().any(RequestOutcome::failed)
    }

    /// Number of pull requests whose approve step succeeded
    #[must_use]
    pub fn approved(&self) -> usize {
        self.requests.iter().filter(|r| r.approve.is_done()).count()
    }

    /// Number of pull requests whose merge step succeeded
    #[must_use]
    pub fn merged(&self) -> usize {
        self.requests.iter().filter(|r| r.merge.is_done()).count()
    }
}
