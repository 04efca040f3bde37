use pr_reviewer::{PrMetadata, PullRequestRef, ReviewRequest};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Inbound PR-event payload.
///
/// Every field is optional so that missing values are reported with a
/// precise message by [`ReviewPayload::validate`] rather than a generic
/// deserialization error. Unknown fields are ignored.
#[derive(Debug, Default)]
pub struct ReviewPayload {
    /// `None` when the field is absent, `null` or an empty object.
    pub pull_request: Option<PullRequestPayload>,
    pub github_token: Option<String>,
}

/// Wire shape; `pull_request` stays untyped until its emptiness is checked.
#[derive(Deserialize)]
struct RawPayload {
    #[serde(default)]
    pull_request: Option<Value>,
    #[serde(default)]
    github_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PullRequestPayload {
    pub url: Option<String>,
    pub comments_url: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// Why a payload was rejected. Rendered as `400 {detail}`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing pull_request in payload")]
    MissingPullRequest,

    #[error("missing pr url or comments_url")]
    MissingUrls,

    #[error("missing github_token")]
    MissingToken,

    #[error("invalid JSON payload: {0}")]
    InvalidJson(String),
}

impl ReviewPayload {
    /// Parses a raw request body regardless of its declared content type.
    pub fn from_bytes(raw: &[u8]) -> Result<Self, ValidationError> {
        let raw: RawPayload = serde_json::from_slice(raw).map_err(invalid_json)?;

        let pull_request = match raw.pull_request {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) if map.is_empty() => None,
            Some(value) => Some(serde_json::from_value(value).map_err(invalid_json)?),
        };

        Ok(Self {
            pull_request,
            github_token: raw.github_token,
        })
    }

    /// Checks required fields and resolves the auth token.
    ///
    /// The payload token wins; `fallback` is used only when the payload
    /// carries none. Whitespace-only values count as absent.
    pub fn validate(self, fallback: Option<&str>) -> Result<ReviewRequest, ValidationError> {
        let pr = self
            .pull_request
            .ok_or(ValidationError::MissingPullRequest)?;

        let (url, comments_url) = match (non_blank(pr.url), non_blank(pr.comments_url)) {
            (Some(url), Some(comments_url)) => (url, comments_url),
            _ => return Err(ValidationError::MissingUrls),
        };

        let auth_token = non_blank(self.github_token)
            .or_else(|| non_blank(fallback.map(str::to_owned)))
            .ok_or(ValidationError::MissingToken)?;

        Ok(ReviewRequest {
            pull_request: PullRequestRef {
                url,
                comments_url,
                meta: PrMetadata {
                    title: pr.title.unwrap_or_default(),
                    body: pr.body.unwrap_or_default(),
                },
            },
            auth_token,
        })
    }
}

fn invalid_json(e: serde_json::Error) -> ValidationError {
    ValidationError::InvalidJson(e.to_string())
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}
