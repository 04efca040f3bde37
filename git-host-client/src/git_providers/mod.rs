//! Source-host seam.
//!
//! The pipeline only needs two calls from a host: read a diff and write a
//! comment. Both take the caller's token per call so one client can serve
//! requests for many installations.

pub mod github;

use std::future::Future;

use crate::errors::HostResult;

/// A code host that can serve pull-request diffs and accept comments.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
pub trait SourceHost: Send + Sync {
    /// Fetches the diff at `url` and returns the body verbatim.
    fn fetch_diff(
        &self,
        url: &str,
        token: &str,
    ) -> impl Future<Output = HostResult<String>> + Send;

    /// Posts `body` as a new comment at `url`.
    ///
    /// Not idempotent: calling twice creates two comments.
    fn post_comment(
        &self,
        url: &str,
        body: &str,
        token: &str,
    ) -> impl Future<Output = HostResult<()>> + Send;
}
