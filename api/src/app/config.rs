//! Service configuration, read once at startup.

use std::fmt;

use ai_llm_service::{
    AiLlmError,
    config::{default_config::config_from_vars, llm_model_config::LlmModelConfig},
    error_handler::opt_var,
};
use git_host_client::HostError;
use thiserror::Error;

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8000";

/// Startup configuration problems. Reported before the listener binds.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value in {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },

    #[error(transparent)]
    Llm(#[from] AiLlmError),

    #[error("source host client: {0}")]
    Host(#[from] HostError),
}

/// Everything the service reads from the environment.
#[derive(Clone)]
pub struct AppConfig {
    /// `host:port` to bind (`API_ADDRESS`).
    pub api_address: String,
    /// Fallback source-host token (`GITHUB_TOKEN`).
    pub github_token: Option<String>,
    /// Completion service settings.
    pub llm: LlmModelConfig,
}

impl AppConfig {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load and validate configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_address =
            opt_var(&get, "API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string());
        validate_address(&api_address)?;

        Ok(Self {
            api_address,
            github_token: opt_var(&get, "GITHUB_TOKEN"),
            llm: config_from_vars(&get)?,
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_address", &self.api_address)
            .field("github_token", &self.github_token.as_ref().map(|_| "***"))
            .field("llm", &self.llm)
            .finish()
    }
}

fn validate_address(addr: &str) -> Result<(), ConfigError> {
    let port = addr.rsplit_once(':').map(|(host, port)| (host.is_empty(), port));
    match port {
        Some((false, port)) if port.parse::<u16>().is_ok() => Ok(()),
        _ => Err(ConfigError::InvalidValue {
            var: "API_ADDRESS",
            reason: format!("expected host:port, got {addr:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    const AZURE: [(&str, &str); 2] = [
        ("AZURE_OPENAI_ENDPOINT", "https://res.openai.azure.com"),
        ("AZURE_OPENAI_API_KEY", "key"),
    ];

    #[test]
    fn defaults() {
        let cfg = AppConfig::from_vars(vars(&AZURE)).unwrap();
        assert_eq!(cfg.api_address, DEFAULT_API_ADDRESS);
        assert_eq!(cfg.github_token, None);
        assert_eq!(cfg.llm.model, "gpt-4o-mini");
    }

    #[test]
    fn reads_address_and_token() {
        let mut pairs = AZURE.to_vec();
        pairs.push(("API_ADDRESS", "127.0.0.1:9000"));
        pairs.push(("GITHUB_TOKEN", "ghp_x"));

        let cfg = AppConfig::from_vars(vars(&pairs)).unwrap();
        assert_eq!(cfg.api_address, "127.0.0.1:9000");
        assert_eq!(cfg.github_token.as_deref(), Some("ghp_x"));
        assert!(!format!("{cfg:?}").contains("ghp_x"));
    }

    #[test]
    fn bad_address_is_rejected() {
        let mut pairs = AZURE.to_vec();
        pairs.push(("API_ADDRESS", "8000"));

        let err = AppConfig::from_vars(vars(&pairs)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: "API_ADDRESS",
                ..
            }
        ));
    }

    #[test]
    fn missing_llm_settings_fail_fast() {
        let err = AppConfig::from_vars(vars(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Llm(_)));
        assert!(err.to_string().contains("AZURE_OPENAI_ENDPOINT"));
    }
}
