use serde::Serialize;

/// `{"status": "..."}` returned by every successful route.
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

impl StatusBody {
    pub const REVIEW_POSTED: Self = Self {
        status: "review_posted",
    };
    pub const HEALTHY: Self = Self { status: "healthy" };
    pub const OK: Self = Self { status: "ok" };
}

/// `{"detail": "..."}` for rejected requests (4xx).
#[derive(Debug, Serialize)]
pub struct DetailBody {
    pub detail: String,
}

/// `{"error": "...", "type": "..."}` for pipeline failures (5xx).
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}
