use axum::Json;

use crate::app::http::response_body::StatusBody;

/// `GET /health`: liveness check.
pub async fn health_route() -> Json<StatusBody> {
    Json(StatusBody::HEALTHY)
}

/// `POST /`: smoke-test endpoint.
pub async fn root_route() -> Json<StatusBody> {
    Json(StatusBody::OK)
}
