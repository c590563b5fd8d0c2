/// AI client — the single point of entry for all external AI calls.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// All chat-completion and transcription traffic MUST go through this module.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::errors::AppError;

/// Chat model used for every summary analysis. Hardcoded to prevent drift;
/// the value is recorded on each stored summary as `ai_model_used`.
pub const CHAT_MODEL: &str = "gpt-4o-mini";
/// Speech-to-text model for audio uploads.
pub const TRANSCRIPTION_MODEL: &str = "whisper-1";

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 2000;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("AI returned empty content")]
    EmptyContent,
}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::Api { status, body } => AppError::Upstream { status, body },
            AiError::Http(e) => AppError::Upstream {
                status: 502,
                body: e.to_string(),
            },
            AiError::EmptyContent => AppError::Upstream {
                status: 502,
                body: "AI returned empty content".to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// The single AI client shared by the transcription and analysis handlers.
/// No retry logic: a transient upstream failure surfaces directly to the
/// caller, matching the product's current behavior.
#[derive(Clone)]
pub struct AiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Makes a chat-completion call and returns the assistant text.
    pub async fn chat(&self, system: &str, user: &str) -> Result<String, AiError> {
        let request_body = ChatRequest {
            model: CHAT_MODEL,
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        if let Some(usage) = &chat.usage {
            debug!(
                "Chat call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.trim().is_empty())
            .ok_or(AiError::EmptyContent)
    }

    /// Submits an audio buffer as a multipart file part to the speech-to-text
    /// endpoint, requesting plain-text output. Returns the raw transcript.
    pub async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, AiError> {
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")
            .expect("static mime type is valid");

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", TRANSCRIPTION_MODEL)
            .text("response_format", "text");

        let response = self
            .client
            .post(format!("{}/v1/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        // response_format=text returns the transcript as the raw body
        Ok(response.text().await?)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }
}
