//! Anthropic Messages API client.
//!
//! Thin HTTP wrapper for `/messages` with one user turn holding a base64
//! image block and the prompt. Pure parsing in `parse_response` for testability.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::Timeouts;
use super::prompt::ImagePayload;
use super::types::FeedbackError;

const API_VERSION: &str = "2023-06-01";

// =============================================================================
// CLIENT
// =============================================================================

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    /// # Errors
    ///
    /// Returns [`FeedbackError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(api_key: String, base_url: String, timeouts: Timeouts) -> Result<Self, FeedbackError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| FeedbackError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    /// # Errors
    ///
    /// Returns a [`FeedbackError`] for transport failures, non-200 statuses,
    /// unparseable bodies, or a response with no text.
    pub async fn generate(
        &self,
        model: &str,
        max_tokens: u32,
        prompt: &str,
        image: &ImagePayload,
    ) -> Result<String, FeedbackError> {
        let body = build_request(model, max_tokens, prompt, image);

        let response = self
            .http
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| FeedbackError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| FeedbackError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(FeedbackError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<RequestBlock<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RequestBlock<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ResponseBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Unknown,
}

// =============================================================================
// BUILD / PARSE
// =============================================================================

fn build_request<'a>(model: &'a str, max_tokens: u32, prompt: &'a str, image: &'a ImagePayload) -> ApiRequest<'a> {
    ApiRequest {
        model,
        max_tokens,
        messages: vec![Message {
            role: "user",
            content: vec![
                RequestBlock::Image {
                    source: ImageSource { kind: "base64", media_type: &image.mime_type, data: &image.data },
                },
                RequestBlock::Text { text: prompt },
            ],
        }],
    }
}

/// Join all text blocks; thinking and other block types are dropped.
fn parse_response(json: &str) -> Result<String, FeedbackError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| FeedbackError::ApiParse(e.to_string()))?;

    let text: String = api
        .content
        .into_iter()
        .filter_map(|block| match block {
            ResponseBlock::Text { text } => Some(text),
            ResponseBlock::Unknown => None,
        })
        .collect();

    if text.trim().is_empty() {
        return Err(FeedbackError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
