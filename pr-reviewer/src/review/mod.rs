//! Review generation: prompt + one completion call.

pub mod prompt;

use std::future::Future;

use ai_llm_service::{
    AiLlmError, ChatCompletion, ChatRequest,
    error_handler::{Provider, ProviderError, ProviderErrorKind},
};
use tracing::{debug, instrument};

use crate::types::PrMetadata;

/// Upper bound on generated review length.
pub const REVIEW_MAX_TOKENS: u32 = 1200;
/// Low randomness so repeated reviews of one diff stay close.
pub const REVIEW_TEMPERATURE: f32 = 0.1;

/// Produces review markdown for a diff.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
pub trait ReviewGenerator: Send + Sync {
    /// Returns the trimmed review text.
    fn generate(
        &self,
        diff: &str,
        meta: &PrMetadata,
    ) -> impl Future<Output = Result<String, AiLlmError>> + Send;
}

/// [`ReviewGenerator`] backed by a chat-completion client.
#[derive(Debug)]
pub struct LlmReviewGenerator<C> {
    client: C,
    provider: Provider,
    system_prompt: String,
}

impl<C: ChatCompletion> LlmReviewGenerator<C> {
    /// Wraps `client`; `provider` only tags errors raised here.
    pub fn new(client: C, provider: Provider) -> Self {
        Self {
            client,
            provider,
            system_prompt: prompt::build_system_prompt(),
        }
    }
}

impl<C: ChatCompletion> ReviewGenerator for LlmReviewGenerator<C> {
    #[instrument(name = "generate_review", skip_all, fields(diff_len = diff.len(), title = %meta.title))]
    async fn generate(&self, diff: &str, meta: &PrMetadata) -> Result<String, AiLlmError> {
        let user = prompt::build_user_prompt(diff, meta);
        debug!(prompt_len = user.len(), "review prompt built");

        let raw = self
            .client
            .complete(ChatRequest {
                system: self.system_prompt.clone(),
                user,
                max_tokens: Some(REVIEW_MAX_TOKENS),
                temperature: Some(REVIEW_TEMPERATURE),
            })
            .await?;

        let review = raw.trim();
        if review.is_empty() {
            return Err(ProviderError::new(self.provider, ProviderErrorKind::EmptyContent).into());
        }

        Ok(review.to_string())
    }
}

#[cfg(test)]
mod tests {
    use ai_llm_service::MockChatCompletion;

    use super::*;

    fn meta() -> PrMetadata {
        PrMetadata {
            title: "Fix bug".into(),
            body: String::new(),
        }
    }

    fn completion_replying(reply: &'static str) -> MockChatCompletion {
        let mut client = MockChatCompletion::new();
        client
            .expect_complete()
            .times(1)
            .returning(move |_| Box::pin(async move { Ok(reply.to_string()) }));
        client
    }

    #[tokio::test]
    async fn sends_prompt_pair_with_fixed_sampling() {
        const DIFF: &str = "+added line\n-removed line";

        let mut client = MockChatCompletion::new();
        client
            .expect_complete()
            .times(1)
            .withf(|req| {
                req.system.contains("checklist")
                    && req.user.contains("Fix bug")
                    && req.user.contains(DIFF)
                    && req.max_tokens == Some(REVIEW_MAX_TOKENS)
                    && req.temperature == Some(REVIEW_TEMPERATURE)
            })
            .returning(|_| Box::pin(async { Ok("review".to_string()) }));

        let generator = LlmReviewGenerator::new(client, Provider::AzureOpenAI);
        assert_eq!(generator.generate(DIFF, &meta()).await.unwrap(), "review");
    }

    #[tokio::test]
    async fn trims_reply() {
        let generator = LlmReviewGenerator::new(
            completion_replying("\n\n## Summary\nok  \n"),
            Provider::AzureOpenAI,
        );
        let out = generator.generate("d", &meta()).await.unwrap();
        assert_eq!(out, "## Summary\nok");
    }

    #[tokio::test]
    async fn whitespace_reply_is_no_usable_content() {
        let generator = LlmReviewGenerator::new(completion_replying("  \n "), Provider::OpenAI);
        let err = generator.generate("d", &meta()).await.unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError {
                provider: Provider::OpenAI,
                kind: ProviderErrorKind::EmptyContent,
            })
        ));
    }

    #[tokio::test]
    async fn client_errors_propagate() {
        let mut client = MockChatCompletion::new();
        client.expect_complete().times(1).returning(|_| {
            Box::pin(async {
                Err(ProviderError::new(Provider::AzureOpenAI, ProviderErrorKind::EmptyChoices).into())
            })
        });

        let generator = LlmReviewGenerator::new(client, Provider::AzureOpenAI);
        let err = generator.generate("d", &meta()).await.unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::EmptyChoices,
                ..
            })
        ));
    }
}
