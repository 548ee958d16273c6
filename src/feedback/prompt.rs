//! Prompt assembly and image payload handling shared by all providers.

use super::types::FeedbackError;

/// Fixed evaluator instructions sent ahead of every task prompt.
pub const BASE_PROMPT: &str = "\
You are a handwriting evaluator for kindergarten students.
The image will be provided for you and it has a reference row of letters at the top and the student's letters below.

Your Task:
- Compare each letter to its reference, checking alignment, shape, and correct formation.
- Provide only the step-by-step corrections for each deviation and conclude with an encouraging summary.
- Do not analyze or explain the steps; just list the corrections and end with motivational feedback.";

const DEFAULT_MIME: &str = "image/png";

/// Instructions, optional language line, then the task prompt.
#[must_use]
pub fn compose(task_prompt: &str, language: &str) -> String {
    let language = language.trim();
    let mut prompt = String::from(BASE_PROMPT);
    if !language.is_empty() && language != "en" {
        prompt.push_str("\n\nPlease respond in ");
        prompt.push_str(language);
        prompt.push('.');
    }
    prompt.push_str("\n\n");
    prompt.push_str(task_prompt);
    prompt
}

/// Raw base64 image data plus its MIME type, ready for a provider request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    /// Accept either `data:<mime>;base64,<payload>` or a bare payload (assumed PNG).
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::InvalidImage`] for an empty payload, a data URI
    /// that is not base64 or not an image.
    pub fn parse(image_base64: &str) -> Result<Self, FeedbackError> {
        let image_base64 = image_base64.trim();
        let (mime_type, data) = match image_base64.strip_prefix("data:") {
            Some(rest) => {
                let (header, data) = rest
                    .split_once(',')
                    .ok_or_else(|| FeedbackError::InvalidImage("data URI has no payload".into()))?;
                let mime = header
                    .strip_suffix(";base64")
                    .ok_or_else(|| FeedbackError::InvalidImage(format!("data URI is not base64: {header}")))?;
                let mime = if mime.is_empty() { DEFAULT_MIME } else { mime };
                if !mime.starts_with("image/") {
                    return Err(FeedbackError::InvalidImage(format!("not an image: {mime}")));
                }
                (mime, data)
            }
            None => (DEFAULT_MIME, image_base64),
        };
        if data.is_empty() {
            return Err(FeedbackError::InvalidImage("empty payload".into()));
        }
        Ok(Self { mime_type: mime_type.to_string(), data: data.to_string() })
    }
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
