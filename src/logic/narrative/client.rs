//! Text-Generation Client
//!
//! OpenAI-compatible chat completions over HTTP.
//! One request per call: no timeout, no retry, no cache.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::types::{CompletionRequest, NarrativeError};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Backend seam for the narrative generator
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Return the generated text, trimmed and non-empty
    async fn complete(&self, request: &CompletionRequest) -> Result<String, NarrativeError>;
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Chat completions client
pub struct OpenAiClient {
    base_url: String,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            http_client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, NarrativeError> {
        let api_key = self.api_key.as_deref().ok_or(NarrativeError::MissingCredential)?;

        let body = ChatRequest {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| NarrativeError::Malformed(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|t| t.trim().to_string())
            .ok_or_else(|| NarrativeError::Malformed("no choices in response".to_string()))?;

        if text.is_empty() {
            return Err(NarrativeError::Empty);
        }
        Ok(text)
    }
}
