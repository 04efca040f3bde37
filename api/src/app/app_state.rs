use ai_llm_service::services::open_ai_service::OpenAiService;
use git_host_client::GitHubClient;
use pr_reviewer::LlmReviewGenerator;

/// Shared state for all HTTP handlers.
///
/// Holds the pipeline collaborators; nothing in here is mutated per request.
pub struct AppState<H, G> {
    /// Source host used to fetch diffs and post comments.
    pub host: H,
    /// Review generator (LLM-backed in production).
    pub generator: G,
    /// Token used when a payload carries none (`GITHUB_TOKEN`).
    pub fallback_token: Option<String>,
}

/// State wired with the production collaborators.
pub type LiveState = AppState<GitHubClient, LlmReviewGenerator<OpenAiService>>;
