//! Google Gemini `generateContent` client.
//!
//! Sends the prompt and the snapshot as inline data in a single user turn.
//! Pure parsing in `parse_response` for testability.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::Timeouts;
use super::prompt::ImagePayload;
use super::types::FeedbackError;

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
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
        let body = build_request(prompt, image, max_tokens);
        let url = format!("{}/models/{model}:generateContent", self.base_url);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
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
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    Inline {
        inline_data: InlineData<'a>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

// =============================================================================
// BUILD / PARSE
// =============================================================================

fn build_request<'a>(prompt: &'a str, image: &'a ImagePayload, max_tokens: u32) -> ApiRequest<'a> {
    ApiRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![
                RequestPart::Text { text: prompt },
                RequestPart::Inline { inline_data: InlineData { mime_type: &image.mime_type, data: &image.data } },
            ],
        }],
        generation_config: GenerationConfig { max_output_tokens: max_tokens },
    }
}

/// Join the text parts of the first candidate.
fn parse_response(json: &str) -> Result<String, FeedbackError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| FeedbackError::ApiParse(e.to_string()))?;

    let text = api
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect::<String>())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(FeedbackError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
