use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State};
use git_host_client::SourceHost;
use pr_reviewer::{ReviewGenerator, ReviewStage, run_review};
use tracing::{Instrument, Span, error, info, instrument, warn};

use crate::{
    app::{app_state::AppState, http::response_body::StatusBody},
    error_handler::{AppError, AppResult},
    routes::review::review_request::ReviewPayload,
};

/// `POST /review`: validates a PR-event payload and runs the review pipeline.
///
/// The pipeline runs on its own task; if the caller disconnects, the
/// in-flight step still runs to completion.
#[instrument(name = "review_route", skip_all)]
pub async fn review_route<H, G>(
    State(state): State<Arc<AppState<H, G>>>,
    body: Bytes,
) -> AppResult<Json<StatusBody>>
where
    H: SourceHost + 'static,
    G: ReviewGenerator + 'static,
{
    info!(
        stage = ReviewStage::Received.as_str(),
        body_len = body.len(),
        "review webhook received"
    );

    let request = ReviewPayload::from_bytes(&body)
        .and_then(|p| p.validate(state.fallback_token.as_deref()))
        .inspect_err(|e| {
            warn!(
                stage = ReviewStage::Rejected.as_str(),
                reason = %e,
                "payload rejected"
            )
        })?;

    let task_state = Arc::clone(&state);
    let handle = tokio::spawn(
        async move { run_review(&task_state.host, &task_state.generator, &request).await }
            .instrument(Span::current()),
    );

    handle.await.map_err(|e| {
        error!(
            stage = ReviewStage::Failed.as_str(),
            panicked = e.is_panic(),
            error = %e,
            "review task did not complete"
        );
        AppError::Internal
    })??;

    Ok(Json(StatusBody::REVIEW_POSTED))
}
