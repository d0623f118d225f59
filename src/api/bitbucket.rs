//! Bitbucket Server REST implementation of the pull request API

use crate::api::PullRequestApi;
use crate::error::{Error, Result};
use crate::types::{PullRequest, RemoteTarget};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Page size requested from list endpoints
const PAGE_LIMIT: u32 = 100;

/// Bitbucket Server service using reqwest
pub struct BitbucketService {
    client: Client,
    base_url: String,
    auth_header: String,
    user_slug: String,
}

/// One page of a paged collection response
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Page<T> {
    values: Vec<T>,
    #[serde(default)]
    is_last_page: bool,
    #[serde(default)]
    next_page_start: Option<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestPullRequest {
    id: u64,
    version: u64,
    title: String,
    #[serde(default)]
    updated_date: Option<i64>,
    #[serde(default)]
    links: Option<RestLinks>,
}

#[derive(Deserialize)]
struct RestLinks {
    #[serde(rename = "self", default)]
    self_refs: Vec<RestLink>,
}

#[derive(Deserialize)]
struct RestLink {
    href: String,
}

impl From<RestPullRequest> for PullRequest {
    fn from(pr: RestPullRequest) -> Self {
        Self {
            id: pr.id,
            version: pr.version,
            title: pr.title,
            url: pr
                .links
                .and_then(|l| l.self_refs.into_iter().next())
                .map(|l| l.href),
            updated_at: pr.updated_date.and_then(DateTime::from_timestamp_millis),
        }
    }
}

impl BitbucketService {
    /// Create a new service for `base_url` (a host name, or a URL with scheme)
    ///
    /// `user_slug` is the identity whose approval is recorded on the server;
    /// `auth_header` is the full `Authorization` header value.
    pub fn new(
        base_url: &str,
        auth_header: String,
        user_slug: String,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", base_url.trim_end_matches('/'))
        };

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Api(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            auth_header,
            user_slug,
        })
    }

    fn pull_requests_url(&self, target: &RemoteTarget) -> String {
        format!(
            "{}/rest/api/1.0/projects/{}/repos/{}/pull-requests",
            self.base_url,
            urlencoding::encode(&target.project),
            urlencoding::encode(&target.slug),
        )
    }
}

#[async_trait]
impl PullRequestApi for BitbucketService {
    async fn list_open_requests(&self, target: &RemoteTarget) -> Result<Vec<PullRequest>> {
        debug!(repo = %target, "listing open pull requests");
        let url = self.pull_requests_url(target);

        let mut requests = Vec::new();
        let mut start: u64 = 0;
        loop {
            let page: Page<RestPullRequest> = self
                .client
                .get(&url)
                .header("Authorization", &self.auth_header)
                .query(&[
                    ("state", "OPEN".to_string()),
                    ("limit", PAGE_LIMIT.to_string()),
                    ("start", start.to_string()),
                ])
                .send()
                .await?
                .error_for_status()
                .map_err(|e| Error::Api(format!("listing pull requests for {target}: {e}")))?
                .json()
                .await?;

            requests.extend(page.values.into_iter().map(Into::into));

            if page.is_last_page {
                break;
            }
            match page.next_page_start {
                Some(next) => start = next,
                None => break,
            }
        }

        debug!(repo = %target, count = requests.len(), "listed open pull requests");
        Ok(requests)
    }

    async fn approve(&self, target: &RemoteTarget, id: u64) -> Result<()> {
        debug!(repo = %target, id, "approving pull request");
        let url = format!(
            "{}/{}/participants/{}",
            self.pull_requests_url(target),
            id,
            urlencoding::encode(&self.user_slug),
        );

        self.client
            .put(&url)
            .header("Authorization", &self.auth_header)
            .json(&serde_json::json!({ "status": "APPROVED" }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Api(format!("approving {target}#{id}: {e}")))?;

        debug!(repo = %target, id, "approved pull request");
        Ok(())
    }

    async fn merge(&self, target: &RemoteTarget, id: u64, version: u64) -> Result<()> {
        debug!(repo = %target, id, version, "merging pull request");
        let url = format!("{}/{}/merge", self.pull_requests_url(target), id);

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.auth_header)
            .query(&[("version", version.to_string())])
            .send()
            .await?;

        // A version conflict means the request changed between fetch and
        // merge; keep it distinguishable from other API failures.
        if response.status() == StatusCode::CONFLICT {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::StaleVersion(format!(
                "{target}#{id} changed on the server since version {version} was fetched: {detail}"
            )));
        }

        response
            .error_for_status()
            .map_err(|e| Error::Api(format!("merging {target}#{id}: {e}")))?;

        debug!(repo = %target, id, "merged pull request");
        Ok(())
    }
}
