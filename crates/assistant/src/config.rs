//! Configuration for the assistant.

use std::env;

use crate::error::AssistantError;

/// Configuration for the assistant.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Chat-completions API URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Maximum tokens for response.
    pub max_tokens: Option<u32>,

    /// Temperature for generation (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Maximum number of history messages to include per turn.
    pub max_history_messages: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: Some(600),
            temperature: Some(0.7),
            max_history_messages: 6,
        }
    }
}

impl AssistantConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `OPENAI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `HELPER_AI_URL` - API URL (default: https://api.openai.com)
    /// - `HELPER_AI_MODEL` - Model name (default: gpt-4o-mini)
    /// - `HELPER_AI_MAX_TOKENS` - Max tokens (default: 600)
    /// - `HELPER_AI_TEMPERATURE` - Temperature (default: 0.7)
    /// - `HELPER_AI_HISTORY_MESSAGES` - History window (default: 6)
    pub fn from_env() -> Result<Self, AssistantError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| AssistantError::Configuration("OPENAI_API_KEY not set".to_string()))?;

        let api_url =
            env::var("HELPER_AI_URL").unwrap_or_else(|_| "https://api.openai.com".to_string());

        let model = env::var("HELPER_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let max_tokens = env::var("HELPER_AI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(600));

        let temperature = env::var("HELPER_AI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.7));

        let max_history_messages = env::var("HELPER_AI_HISTORY_MESSAGES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(6);

        Ok(Self {
            api_url,
            api_key,
            model,
            max_tokens,
            temperature,
            max_history_messages,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }
}

/// Builder for AssistantConfig.
#[derive(Debug, Default)]
pub struct AssistantConfigBuilder {
    config: AssistantConfig,
}

impl AssistantConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the history window.
    pub fn max_history_messages(mut self, count: usize) -> Self {
        self.config.max_history_messages = count;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> AssistantConfig {
        self.config
    }
}
