use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pr_reviewer::ReviewError;
use thiserror::Error;
use tracing::error;

use crate::{
    app::{
        config::ConfigError,
        http::response_body::{DetailBody, ErrorBody},
    },
    routes::review::review_request::ValidationError,
};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / pipeline ---
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Review(#[from] ReviewError),

    /// The review task panicked or was aborted. Details stay in the logs.
    #[error("review task failed")]
    Internal,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::Validation(_) => StatusCode::BAD_REQUEST,

            // 5xx
            AppError::Config(_)
            | AppError::Bind { .. }
            | AppError::Server(_)
            | AppError::Review(_)
            | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Value of the `type` field in 5xx bodies.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            AppError::Review(e) => Some(e.kind()),
            AppError::Internal => Some("internal"),
            AppError::Validation(_) => None,
            AppError::Config(_) => Some("config"),
            AppError::Bind { .. } | AppError::Server(_) => Some("server"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_client_error() {
            return (
                status,
                Json(DetailBody {
                    detail: self.to_string(),
                }),
            )
                .into_response();
        }

        error!(kind = ?self.kind(), error = %self, "request failed");
        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
