//! Per-request data carried through the pipeline. Nothing here outlives a
//! single webhook delivery.

use std::fmt;

/// Title and description of the pull request, as given by the webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrMetadata {
    pub title: String,
    pub body: String,
}

/// The pull request the review is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    /// API URL of the pull request; serves the diff.
    pub url: String,
    /// API URL that accepts new comments.
    pub comments_url: String,
    pub meta: PrMetadata,
}

/// A validated review request. URLs and token are non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    pub pull_request: PullRequestRef,
    pub auth_token: String,
}

impl fmt::Debug for ReviewRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewRequest")
            .field("pull_request", &self.pull_request)
            .field("auth_token", &"***")
            .finish()
    }
}

/// The markdown review that was posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewResult {
    pub text: String,
}

/// Where a request is in the pipeline.
///
/// `Received -> Validated -> DiffFetched -> ReviewGenerated -> CommentPosted`,
/// with `Rejected` (validation) and `Failed` (collaborator error) as the
/// terminal failure states. Each transition happens at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStage {
    Received,
    Validated,
    DiffFetched,
    ReviewGenerated,
    CommentPosted,
    Rejected,
    Failed,
}

impl ReviewStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewStage::Received => "received",
            ReviewStage::Validated => "validated",
            ReviewStage::DiffFetched => "diff_fetched",
            ReviewStage::ReviewGenerated => "review_generated",
            ReviewStage::CommentPosted => "comment_posted",
            ReviewStage::Rejected => "rejected",
            ReviewStage::Failed => "failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReviewStage::CommentPosted | ReviewStage::Rejected | ReviewStage::Failed
        )
    }
}

impl fmt::Display for ReviewStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
