//! HTTP surface of the review service.
//!
//! Routes:
//! - `POST /review`: PR-event webhook, runs the review pipeline
//! - `GET  /health`: liveness check
//! - `POST /`      : smoke test

pub mod app;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use std::sync::Arc;

use ai_llm_service::{error_handler::Provider, services::open_ai_service::OpenAiService};
use axum::{
    Router, middleware,
    routing::{get, post},
};
use git_host_client::{GitHubClient, SourceHost};
use pr_reviewer::{LlmReviewGenerator, ReviewGenerator};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use crate::{
    app::{
        app_state::{AppState, LiveState},
        config::{AppConfig, ConfigError},
    },
    error_handler::{AppError, AppResult},
    middleware_layer::request_id::request_id,
    routes::{
        health_route::{health_route, root_route},
        review::review_route::review_route,
    },
};

/// Builds the router over any pair of pipeline collaborators.
pub fn router<H, G>(state: Arc<AppState<H, G>>) -> Router
where
    H: SourceHost + 'static,
    G: ReviewGenerator + 'static,
{
    Router::new()
        .route("/", post(root_route))
        .route("/health", get(health_route))
        .route("/review", post(review_route::<H, G>))
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}

/// Wires the production collaborators from `config`.
pub fn live_state(config: &AppConfig) -> Result<LiveState, ConfigError> {
    let host = GitHubClient::new()?;
    let llm = OpenAiService::new(config.llm.clone())?;
    let generator = LlmReviewGenerator::new(llm, Provider::from(config.llm.provider));

    Ok(AppState {
        host,
        generator,
        fallback_token: config.github_token.clone(),
    })
}

/// Serves on an already bound listener until Ctrl+C.
pub async fn serve<H, G>(listener: TcpListener, state: Arc<AppState<H, G>>) -> AppResult<()>
where
    H: SourceHost + 'static,
    G: ReviewGenerator + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)
}

/// Binds `config.api_address` and runs the service until shutdown.
pub async fn start(config: AppConfig) -> AppResult<()> {
    let state = Arc::new(live_state(&config)?);

    let listener = TcpListener::bind(&config.api_address)
        .await
        .map_err(|source| AppError::Bind {
            addr: config.api_address.clone(),
            source,
        })?;

    info!(address = %config.api_address, "review service listening");
    serve(listener, state).await?;
    info!("review service stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            // Without a signal handler, keep serving until the process is killed.
            error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
