//! Feedback: sends a notebook snapshot to a multimodal model for evaluation.
//!
//! DESIGN
//! ======
//! Configured from environment variables. `FeedbackClient` dispatches to
//! Gemini or Anthropic based on `FEEDBACK_PROVIDER`; both providers receive
//! the same assembled prompt and the raw base64 image stripped of its data
//! URI prefix. Callers depend on [`FeedbackEvaluator`] so tests can swap in
//! a mock.

pub mod anthropic;
pub mod config;
pub mod gemini;
pub mod prompt;
pub mod types;

use async_trait::async_trait;
use tracing::debug;

use config::{FeedbackConfig, ProviderKind};
use prompt::ImagePayload;
pub use types::{FeedbackError, FeedbackEvaluator};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete evaluator that dispatches to Gemini or Anthropic.
pub struct FeedbackClient {
    inner: Provider,
    model: String,
    max_tokens: u32,
}

enum Provider {
    Gemini(gemini::GeminiClient),
    Anthropic(anthropic::AnthropicClient),
}

impl FeedbackClient {
    /// Build a client from environment variables (see [`FeedbackConfig::from_lookup`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, the API key is missing, or
    /// the HTTP client fails to build.
    pub fn from_env() -> Result<Self, FeedbackError> {
        Self::from_config(FeedbackConfig::from_env()?)
    }

    /// Build a client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: FeedbackConfig) -> Result<Self, FeedbackError> {
        let inner = match config.provider {
            ProviderKind::Gemini => {
                Provider::Gemini(gemini::GeminiClient::new(config.api_key, config.base_url, config.timeouts)?)
            }
            ProviderKind::Anthropic => {
                Provider::Anthropic(anthropic::AnthropicClient::new(config.api_key, config.base_url, config.timeouts)?)
            }
        };
        Ok(Self { inner, model: config.model, max_tokens: config.max_tokens })
    }

    /// Configured model name (e.g. `"gemini-1.5-pro"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl FeedbackEvaluator for FeedbackClient {
    async fn evaluate(&self, prompt: &str, image_base64: &str, language: &str) -> Result<String, FeedbackError> {
        let image = ImagePayload::parse(image_base64)?;
        let full_prompt = prompt::compose(prompt, language);
        debug!(model = %self.model, mime = %image.mime_type, bytes = image.data.len(), "requesting feedback");
        match &self.inner {
            Provider::Gemini(c) => c.generate(&self.model, self.max_tokens, &full_prompt, &image).await,
            Provider::Anthropic(c) => c.generate(&self.model, self.max_tokens, &full_prompt, &image).await,
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
