use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{Instrument, info_span};

pub const REQUEST_ID: &str = "x-request-id";
const GITHUB_DELIVERY: &str = "x-github-delivery";

/// Picks the id for this request: `X-Request-Id`, else `X-GitHub-Delivery`,
/// else a fresh timestamp-based id.
fn resolve_request_id(headers: &HeaderMap) -> HeaderValue {
    [REQUEST_ID, GITHUB_DELIVERY]
        .into_iter()
        .filter_map(|name| headers.get(name))
        .find(|v| v.to_str().is_ok_and(|s| !s.trim().is_empty()))
        .cloned()
        .unwrap_or_else(generate_request_id)
}

fn generate_request_id() -> HeaderValue {
    let now = Utc::now();
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros() * 1000);
    HeaderValue::try_from(format!("req-{nanos}"))
        .unwrap_or_else(|_| HeaderValue::from_static("req-unknown"))
}

/// Runs the request inside a span tagged with its id and echoes the id back
/// in the `X-Request-Id` response header.
pub async fn request_id(req: Request<Body>, next: Next) -> Response {
    let id = resolve_request_id(req.headers());
    let span = info_span!(
        "request",
        request_id = %id.to_str().unwrap_or_default(),
        method = %req.method(),
        path = %req.uri().path(),
    );

    let mut res = next.run(req).instrument(span).await;
    res.headers_mut().insert(REQUEST_ID, id);
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_request_id_then_delivery() {
        let mut headers = HeaderMap::new();
        headers.insert(GITHUB_DELIVERY, HeaderValue::from_static("gh-1"));
        assert_eq!(resolve_request_id(&headers), "gh-1");

        headers.insert(REQUEST_ID, HeaderValue::from_static("abc"));
        assert_eq!(resolve_request_id(&headers), "abc");
    }

    #[test]
    fn blank_header_falls_through_to_generated() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID, HeaderValue::from_static("  "));

        let id = resolve_request_id(&headers);
        let id = id.to_str().unwrap();
        assert!(id.starts_with("req-"));
        assert!(id["req-".len()..].chars().all(|c| c.is_ascii_digit()));
    }
}
