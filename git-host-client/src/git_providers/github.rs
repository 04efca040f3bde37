//! GitHub provider (REST v3) for PR diffs and issue comments.
//!
//! URLs come straight from the webhook payload:
//!   * GET  {pull_request.url}            with `Accept: application/vnd.github.v3.diff`
//!   * POST {pull_request.comments_url}   with `{"body": "..."}`

use std::time::{Duration, Instant};

use reqwest::{Client, Response, header};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::errors::{HostError, HostOperation, HostResult, make_snippet};
use crate::git_providers::SourceHost;

/// Upper bound on every GitHub call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("pr-review-backend/", env!("CARGO_PKG_VERSION"));
const DIFF_MEDIA_TYPE: &str = "application/vnd.github.v3.diff";
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

/// GitHub HTTP client wrapper.
///
/// Holds one pooled `reqwest::Client`; tokens are supplied per call.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    timeout: Duration,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

impl GitHubClient {
    /// Constructs a client with the default 30 second timeout.
    pub fn new() -> HostResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Constructs a client whose calls are bounded by `timeout`.
    pub fn with_timeout(timeout: Duration) -> HostResult<Self> {
        debug!(timeout_secs = timeout.as_secs_f32(), "Creating GitHubClient");

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| HostError::ClientBuild(e.to_string()))?;

        Ok(Self { http, timeout })
    }

    fn auth_header(token: &str) -> HostResult<header::HeaderValue> {
        let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|_| HostError::InvalidToken)?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Turns a non-2xx response into [`HostError::HttpStatus`], keeping the body.
    async fn check_status(
        &self,
        resp: Response,
        op: HostOperation,
        url: &str,
    ) -> HostResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_else(|e| {
            warn!(%op, %url, error = %e, "failed to read error response body");
            String::new()
        });
        let snippet = make_snippet(&body);

        error!(%op, %url, status = status.as_u16(), %snippet, "GitHub returned non-success status");

        Err(HostError::HttpStatus {
            op,
            url: url.to_string(),
            code: status.as_u16(),
            body,
            snippet,
        })
    }

    fn transport(&self, e: reqwest::Error, op: HostOperation, url: &str) -> HostError {
        let err = HostError::from_transport(&e, op, url, self.timeout);
        error!(%op, %url, kind = err.kind(), error = %e, "GitHub request failed");
        err
    }
}

impl SourceHost for GitHubClient {
    async fn fetch_diff(&self, url: &str, token: &str) -> HostResult<String> {
        let op = HostOperation::FetchDiff;
        let auth = Self::auth_header(token)?;
        let started = Instant::now();
        info!(%url, "Fetching PR diff");

        let resp = self
            .http
            .get(url)
            .header(header::AUTHORIZATION, auth)
            .header(header::ACCEPT, DIFF_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| self.transport(e, op, url))?;

        let resp = self.check_status(resp, op, url).await?;
        let diff = resp.text().await.map_err(|e| self.transport(e, op, url))?;

        debug!(
            %url,
            diff_len = diff.len(),
            latency_ms = started.elapsed().as_millis(),
            "PR diff fetched"
        );

        Ok(diff)
    }

    async fn post_comment(&self, url: &str, body: &str, token: &str) -> HostResult<()> {
        let op = HostOperation::PostComment;
        let auth = Self::auth_header(token)?;
        let started = Instant::now();
        info!(%url, body_len = body.len(), "Posting comment");

        let resp = self
            .http
            .post(url)
            .header(header::AUTHORIZATION, auth)
            .header(header::ACCEPT, JSON_MEDIA_TYPE)
            .json(&CommentBody { body })
            .send()
            .await
            .map_err(|e| self.transport(e, op, url))?;

        self.check_status(resp, op, url).await?;

        debug!(
            %url,
            latency_ms = started.elapsed().as_millis(),
            "Comment posted"
        );

        Ok(())
    }
}
