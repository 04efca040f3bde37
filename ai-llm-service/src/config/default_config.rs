//! Default LLM config loaded from environment variables.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = provider kind (`azure` by default, or `openai`)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64, default 60)
//!
//! Azure-specific:
//! - `AZURE_OPENAI_ENDPOINT`    = resource endpoint (mandatory)
//! - `AZURE_OPENAI_API_KEY`     = credential (mandatory)
//! - `AZURE_OPENAI_API_VERSION` = `api-version` (default `2024-12-01-preview`)
//! - `AZURE_OPENAI_MODEL`       = deployment name (default `gpt-4o-mini`)
//!
//! OpenAI-specific:
//! - `OPENAI_BASE_URL` = endpoint (default `https://api.openai.com`)
//! - `OPENAI_API_KEY`  = credential (mandatory)
//! - `OPENAI_MODEL`    = model (default `gpt-4o-mini`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{Result, must_var, opt_var, opt_var_u64, validate_http_endpoint},
};

pub const DEFAULT_AZURE_API_VERSION: &str = "2024-12-01-preview";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Builds the completion config from an arbitrary variable lookup.
///
/// # Errors
/// - `UnsupportedProvider` for an unknown `LLM_KIND`
/// - `MissingVar` for an absent endpoint/key
/// - `InvalidFormat` for a non-http(s) endpoint
/// - `InvalidNumber` for a malformed `LLM_TIMEOUT_SECS`
pub fn config_from_vars<F>(get: F) -> Result<LlmModelConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let provider = match opt_var(&get, "LLM_KIND") {
        Some(kind) => kind.parse::<LlmProvider>()?,
        None => LlmProvider::AzureOpenAI,
    };
    let timeout_secs = opt_var_u64(&get, "LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    let cfg = match provider {
        LlmProvider::AzureOpenAI => {
            let endpoint = must_var(&get, "AZURE_OPENAI_ENDPOINT")?;
            validate_http_endpoint("AZURE_OPENAI_ENDPOINT", &endpoint)?;
            LlmModelConfig {
                provider,
                model: opt_var(&get, "AZURE_OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
                endpoint,
                api_key: Some(must_var(&get, "AZURE_OPENAI_API_KEY")?),
                api_version: Some(
                    opt_var(&get, "AZURE_OPENAI_API_VERSION")
                        .unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.into()),
                ),
                max_tokens: None,
                temperature: None,
                timeout_secs: Some(timeout_secs),
            }
        }
        LlmProvider::OpenAI => {
            let endpoint = opt_var(&get, "OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into());
            validate_http_endpoint("OPENAI_BASE_URL", &endpoint)?;
            LlmModelConfig {
                provider,
                model: opt_var(&get, "OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
                endpoint,
                api_key: Some(must_var(&get, "OPENAI_API_KEY")?),
                api_version: None,
                max_tokens: None,
                temperature: None,
                timeout_secs: Some(timeout_secs),
            }
        }
    };

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error_handler::{AiLlmError, ConfigError};

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn azure_defaults() {
        let cfg = config_from_vars(vars(&[
            ("AZURE_OPENAI_ENDPOINT", "https://res.openai.azure.com"),
            ("AZURE_OPENAI_API_KEY", "k"),
        ]))
        .unwrap();

        assert_eq!(cfg.provider, LlmProvider::AzureOpenAI);
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert_eq!(cfg.api_version.as_deref(), Some("2024-12-01-preview"));
        assert_eq!(cfg.timeout_secs, Some(60));
    }

    #[test]
    fn azure_requires_endpoint() {
        let err = config_from_vars(vars(&[("AZURE_OPENAI_API_KEY", "k")])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingVar("AZURE_OPENAI_ENDPOINT"))
        ));
    }

    #[test]
    fn azure_requires_key() {
        let err = config_from_vars(vars(&[(
            "AZURE_OPENAI_ENDPOINT",
            "https://res.openai.azure.com",
        )]))
        .unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingVar("AZURE_OPENAI_API_KEY"))
        ));
    }

    #[test]
    fn endpoint_must_be_http() {
        let err = config_from_vars(vars(&[
            ("AZURE_OPENAI_ENDPOINT", "res.openai.azure.com"),
            ("AZURE_OPENAI_API_KEY", "k"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn openai_kind_and_overrides() {
        let cfg = config_from_vars(vars(&[
            ("LLM_KIND", "openai"),
            ("OPENAI_API_KEY", "sk"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("LLM_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();

        assert_eq!(cfg.provider, LlmProvider::OpenAI);
        assert_eq!(cfg.endpoint, "https://api.openai.com");
        assert_eq!(cfg.model, "gpt-4o");
        assert_eq!(cfg.api_version, None);
        assert_eq!(cfg.timeout_secs, Some(15));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = config_from_vars(vars(&[("LLM_KIND", "ollama")])).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::UnsupportedProvider(_))
        ));
    }
}
