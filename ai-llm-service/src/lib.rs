//! Chat-completion client shared by the review pipeline.
//!
//! - [`config`] describes a provider/model and loads it from the environment.
//! - [`services::open_ai_service::OpenAiService`] talks to Azure OpenAI or OpenAI.
//! - [`ChatCompletion`] is the seam consumers depend on; with the `testkit`
//!   feature a `MockChatCompletion` is generated for it.

pub mod config;
pub mod error_handler;
pub mod services;

use std::future::Future;

pub use error_handler::{AiLlmError, Result};

/// A single system + user exchange sent to a chat-completion endpoint.
///
/// `max_tokens` and `temperature` override the values in the model config
/// when set.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Anything that can turn a [`ChatRequest`] into the text of the first
/// completion choice.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
pub trait ChatCompletion: Send + Sync {
    /// Returns the raw (untrimmed) content of the first choice.
    fn complete(&self, request: ChatRequest) -> impl Future<Output = Result<String>> + Send;
}
