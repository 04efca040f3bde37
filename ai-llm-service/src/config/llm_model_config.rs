use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// # Fields
///
/// - `provider`: Which backend to use (Azure OpenAI or OpenAI).
/// - `model`: Model identifier; for Azure this is the deployment name.
/// - `endpoint`: Base URL of the service.
/// - `api_key`: Credential for the service.
/// - `api_version`: Azure `api-version` query value (ignored by OpenAI).
/// - `max_tokens`: Default upper bound on generated tokens.
/// - `temperature`: Default sampling temperature.
/// - `timeout_secs`: Optional request timeout in seconds.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_model_config::LlmModelConfig;
/// use ai_llm_service::config::llm_provider::LlmProvider;
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::AzureOpenAI,
///     model: "gpt-4o-mini".to_string(),
///     endpoint: "https://my-resource.openai.azure.com".to_string(),
///     api_key: Some("secret".to_string()),
///     api_version: Some("2024-12-01-preview".to_string()),
///     max_tokens: None,
///     temperature: None,
///     timeout_secs: Some(60),
/// };
/// assert_eq!(cfg.provider, LlmProvider::AzureOpenAI);
/// ```
#[derive(Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The completion backend.
    pub provider: LlmProvider,

    /// Model (or Azure deployment) identifier.
    pub model: String,

    /// Base URL of the service.
    pub endpoint: String,

    /// Credential for authentication.
    pub api_key: Option<String>,

    /// Azure `api-version` query parameter.
    pub api_version: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

// Hand-written so the key never reaches logs.
impl std::fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_version", &self.api_version)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
