//! Pipeline error taxonomy.
//!
//! Collaborators never swallow errors; the pipeline wraps them unchanged so
//! the HTTP layer can classify by kind.

use ai_llm_service::AiLlmError;
use git_host_client::HostError;
use thiserror::Error;

/// Convenient alias for pipeline results.
pub type PrResult<T> = Result<T, ReviewError>;

/// Failure of a pipeline step after validation.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Diff fetch or comment post failed.
    #[error(transparent)]
    Host(#[from] HostError),

    /// The completion call failed or returned no usable content.
    #[error("completion service error: {0}")]
    Completion(#[from] AiLlmError),
}

impl ReviewError {
    /// Stable machine-readable kind, used as the `type` of error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            ReviewError::Host(e) => e.kind(),
            ReviewError::Completion(_) => "completion_service",
        }
    }
}
