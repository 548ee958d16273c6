//! Feedback types: the evaluator seam and its errors.

use async_trait::async_trait;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while asking a remote service to evaluate a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The provider answered without any text.
    #[error("evaluator returned no text")]
    EmptyResponse,

    /// The image argument is not base64 PNG/JPEG data.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

impl FeedbackError {
    /// Whether sending the same request again may succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// EVALUATOR
// =============================================================================

/// Anything that can turn a handwriting snapshot into written feedback.
///
/// `image_base64` may be a full `data:` URI or the bare base64 payload.
/// `language` is a language code or name; `""` and `"en"` mean English.
#[async_trait]
pub trait FeedbackEvaluator: Send + Sync {
    async fn evaluate(&self, prompt: &str, image_base64: &str, language: &str) -> Result<String, FeedbackError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
