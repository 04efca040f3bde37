//! Error taxonomy for source-host calls.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Convenient alias for source-host results.
pub type HostResult<T> = Result<T, HostError>;

/// Which host operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOperation {
    FetchDiff,
    PostComment,
}

impl fmt::Display for HostOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostOperation::FetchDiff => f.write_str("fetching diff"),
            HostOperation::PostComment => f.write_str("posting comment"),
        }
    }
}

/// Failure of a single source-host call.
///
/// Every variant is raised by the call that failed; nothing here is retried.
#[derive(Debug, Clone, Error)]
pub enum HostError {
    /// The call did not complete within the client timeout.
    #[error("timed out after {timeout:?} while {op} at {url}")]
    Timeout {
        op: HostOperation,
        url: String,
        timeout: Duration,
    },

    /// DNS/connect/reset or any other transport failure without a status.
    #[error("connection error while {op} at {url}: {reason}")]
    Connection {
        op: HostOperation,
        url: String,
        reason: String,
    },

    /// The host answered with a non-2xx status.
    #[error("source host API error while {op}: HTTP {code} from {url}: {snippet}")]
    HttpStatus {
        op: HostOperation,
        url: String,
        code: u16,
        /// Full response body as returned by the host.
        body: String,
        /// Whitespace-collapsed, truncated body for messages and logs.
        snippet: String,
    },

    /// The token cannot be sent as an HTTP header; no request was made.
    #[error("auth token contains characters not allowed in an HTTP header")]
    InvalidToken,

    /// The HTTP client could not be constructed (startup only).
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl HostError {
    /// Stable machine-readable kind, used as the `type` of error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            HostError::Timeout { .. } => "timeout",
            HostError::Connection { .. } => "connection",
            HostError::HttpStatus { .. } => "http_status",
            HostError::InvalidToken => "invalid_token",
            HostError::ClientBuild(_) => "client_build",
        }
    }

    /// Maps a transport-level `reqwest` failure for `op` on `url`.
    pub(crate) fn from_transport(
        e: &reqwest::Error,
        op: HostOperation,
        url: &str,
        timeout: Duration,
    ) -> Self {
        if e.is_timeout() {
            HostError::Timeout {
                op,
                url: url.to_string(),
                timeout,
            }
        } else {
            HostError::Connection {
                op,
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

const SNIPPET_MAX_CHARS: usize = 200;

pub(crate) fn make_snippet(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= SNIPPET_MAX_CHARS {
        collapsed
    } else {
        let mut s: String = collapsed.chars().take(SNIPPET_MAX_CHARS).collect();
        s.push('…');
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        let timeout = HostError::Timeout {
            op: HostOperation::FetchDiff,
            url: "u".into(),
            timeout: Duration::from_secs(30),
        };
        assert_eq!(timeout.kind(), "timeout");
        assert!(timeout.to_string().contains("timed out"));

        let status = HostError::HttpStatus {
            op: HostOperation::PostComment,
            url: "u".into(),
            code: 404,
            body: "{\"message\":\"Not Found\"}".into(),
            snippet: "{\"message\":\"Not Found\"}".into(),
        };
        assert_eq!(status.kind(), "http_status");
        assert!(status.to_string().contains("HTTP 404"));
        assert!(status.to_string().contains("posting comment"));
    }
}
