//! Public entry for the pr-reviewer pipeline.
//!
//! One call reviews one pull request:
//!
//! 1) **Fetch** the diff from the source host (opaque text, never parsed)
//! 2) **Generate** a markdown review from the diff and PR metadata
//! 3) **Post** the review as a single comment
//!
//! Steps run strictly in order because each needs the previous output.
//! Nothing is retried and nothing is deduplicated: running the pipeline
//! twice for the same request posts two comments. If a later step fails
//! after an earlier one succeeded, no compensating action is taken.
//!
//! Collaborators are passed in by the caller ([`SourceHost`],
//! [`ReviewGenerator`]). The `testkit` feature generates `MockReviewGenerator`
//! for downstream tests.

pub mod errors;
pub mod review;
pub mod types;

use std::time::Instant;

use git_host_client::SourceHost;
use tracing::{error, info};

pub use errors::{PrResult, ReviewError};
pub use review::{LlmReviewGenerator, ReviewGenerator};
#[cfg(any(test, feature = "testkit"))]
pub use review::MockReviewGenerator;
pub use types::{PrMetadata, PullRequestRef, ReviewRequest, ReviewResult, ReviewStage};

/// Runs fetch -> generate -> post for an already validated request.
///
/// # Errors
/// - [`ReviewError::Host`] if fetching the diff or posting the comment fails
/// - [`ReviewError::Completion`] if the completion call fails
pub async fn run_review<H, G>(
    host: &H,
    generator: &G,
    request: &ReviewRequest,
) -> PrResult<ReviewResult>
where
    H: SourceHost,
    G: ReviewGenerator,
{
    let started = Instant::now();
    let pr = &request.pull_request;
    let mut stage = ReviewStage::Validated;
    info!(%stage, pr_url = %pr.url, title = %pr.meta.title, "review pipeline started");

    let outcome = async {
        let diff = host.fetch_diff(&pr.url, &request.auth_token).await?;
        stage = ReviewStage::DiffFetched;
        info!(%stage, diff_len = diff.len(), "diff fetched");

        let review = generator.generate(&diff, &pr.meta).await?;
        stage = ReviewStage::ReviewGenerated;
        info!(%stage, review_len = review.len(), "review generated");

        host.post_comment(&pr.comments_url, &review, &request.auth_token)
            .await?;
        stage = ReviewStage::CommentPosted;

        Ok::<_, ReviewError>(ReviewResult { text: review })
    }
    .await;

    match &outcome {
        Ok(_) => info!(
            %stage,
            comments_url = %pr.comments_url,
            latency_ms = started.elapsed().as_millis(),
            "review posted"
        ),
        Err(e) => error!(
            last_stage = %stage,
            stage = ReviewStage::Failed.as_str(),
            kind = e.kind(),
            error = %e,
            latency_ms = started.elapsed().as_millis(),
            "review pipeline failed"
        ),
    }

    outcome
}
