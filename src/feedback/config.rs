//! Feedback provider configuration parsed from environment variables.

use super::types::FeedbackError;

pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Anthropic,
}

impl ProviderKind {
    #[must_use]
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "gemini-1.5-pro",
            Self::Anthropic => "claude-sonnet-4-5-20250929",
        }
    }

    #[must_use]
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Self::Anthropic => "https://api.anthropic.com/v1",
        }
    }

    /// Variable holding the key when `FEEDBACK_API_KEY_ENV` is unset.
    #[must_use]
    pub fn default_key_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackConfig {
    pub provider: ProviderKind,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub timeouts: Timeouts,
}

impl FeedbackConfig {
    /// Build typed config from the process environment.
    ///
    /// # Errors
    ///
    /// See [`FeedbackConfig::from_lookup`].
    pub fn from_env() -> Result<Self, FeedbackError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from any key/value source.
    ///
    /// Optional:
    /// - `FEEDBACK_PROVIDER`: `gemini` (default) or `anthropic`
    /// - `FEEDBACK_API_KEY_ENV`: names the variable holding the key
    ///   (default `GEMINI_API_KEY` / `ANTHROPIC_API_KEY`)
    /// - `FEEDBACK_MODEL`: provider default when absent
    /// - `FEEDBACK_BASE_URL`: provider default when absent
    /// - `FEEDBACK_MAX_TOKENS`: default 1024
    /// - `FEEDBACK_REQUEST_TIMEOUT_SECS`: default 120
    /// - `FEEDBACK_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::ConfigParse`] for an unknown provider or a
    /// non-numeric limit, and [`FeedbackError::MissingApiKey`] when the key
    /// variable is unset or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FeedbackError> {
        let provider = parse_provider(lookup("FEEDBACK_PROVIDER").as_deref())?;

        let key_var = lookup("FEEDBACK_API_KEY_ENV").unwrap_or_else(|| provider.default_key_var().to_string());
        let api_key = lookup(&key_var)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| FeedbackError::MissingApiKey { var: key_var.clone() })?;

        let model = lookup("FEEDBACK_MODEL").unwrap_or_else(|| provider.default_model().to_string());
        let base_url = lookup("FEEDBACK_BASE_URL")
            .unwrap_or_else(|| provider.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string();
        let max_tokens = parse_number(&lookup, "FEEDBACK_MAX_TOKENS", DEFAULT_MAX_TOKENS)?;
        let timeouts = Timeouts {
            request_secs: parse_number(&lookup, "FEEDBACK_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_number(&lookup, "FEEDBACK_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { provider, api_key, model, base_url, max_tokens, timeouts })
    }
}

fn parse_provider(raw: Option<&str>) -> Result<ProviderKind, FeedbackError> {
    match raw.map_or("gemini", str::trim) {
        "gemini" => Ok(ProviderKind::Gemini),
        "anthropic" => Ok(ProviderKind::Anthropic),
        other => Err(FeedbackError::ConfigParse(format!("unknown FEEDBACK_PROVIDER: {other}"))),
    }
}

fn parse_number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, FeedbackError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => {
            raw.trim().parse::<T>().map_err(|_| FeedbackError::ConfigParse(format!("{key} is not a number: {raw}")))
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
