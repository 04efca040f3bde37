use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Represents the hosted chat-completion backend.
///
/// Both speak the same chat-completions wire format; they differ in URL
/// layout and in how the credential is sent.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_provider::LlmProvider;
///
/// let p: LlmProvider = "azure".parse().unwrap();
/// assert_eq!(p, LlmProvider::AzureOpenAI);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Azure OpenAI deployment (`api-key` header, `api-version` query).
    AzureOpenAI,
    /// OpenAI public API (Bearer token).
    OpenAI,
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "azure" | "azure_openai" | "azure-openai" => Ok(LlmProvider::AzureOpenAI),
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}
