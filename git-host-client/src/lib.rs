//! Source-host client used by the review pipeline.
//!
//! Exposes the [`SourceHost`] seam (fetch a diff, post a comment) and its
//! GitHub REST implementation. All failures are returned as a tagged
//! [`HostError`] so callers can match on the kind.

pub mod errors;
pub mod git_providers;

pub use errors::{HostError, HostOperation, HostResult};
pub use git_providers::{SourceHost, github::GitHubClient};

#[cfg(any(test, feature = "testkit"))]
pub use git_providers::MockSourceHost;
