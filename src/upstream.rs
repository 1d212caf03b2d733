//! Upstream chat-completion client
//!
//! [`CompletionBackend`] is the seam between the relay and the provider.
//! [`OpenAiClient`] talks to any OpenAI-compatible `/chat/completions` endpoint.

use crate::chat::ChatMessage;
use crate::config::{Config, UpstreamSettings};
use crate::error::UpstreamError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload of one completion call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Pair the conversation with the fixed model parameters.
    #[must_use]
    pub fn new(
        settings: &UpstreamSettings,
        messages: Vec<ChatMessage>,
    ) -> Self {
        Self {
            model: settings.model.clone(),
            messages,
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Build a response holding a single choice, mostly useful for fakes.
    #[must_use]
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            choices: vec![CompletionChoice {
                message: CompletionMessage {
                    content: Some(content.into()),
                },
            }],
        }
    }

    /// Text of the first choice.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::MalformedResponse`] when there are no choices or
    /// the first one has no text content.
    pub fn into_first_content(self) -> Result<String, UpstreamError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::malformed("response contained no choices"))?;

        choice
            .message
            .content
            .ok_or_else(|| UpstreamError::malformed("first choice carried no text content"))
    }
}

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, UpstreamError>;
}

/// Client for OpenAI-compatible chat-completion APIs.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(
        settings: &UpstreamSettings,
        api_key: Option<String>,
    ) -> Self {
        Self::with_http_client(reqwest::Client::new(), settings, api_key)
    }

    #[must_use]
    pub fn with_http_client(
        http: reqwest::Client,
        settings: &UpstreamSettings,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            url: settings.completions_url(),
            api_key,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.upstream, config.api_key.clone())
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Debug for OpenAiClient {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, UpstreamError> {
        let mut builder = self.http.post(&self.url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!("Upstream returned {}: {}", status, body);
            let fallback = status.canonical_reason().unwrap_or("no reason given");
            return Err(UpstreamError::from_status(
                status.as_u16(),
                provider_message(&body, fallback),
            ));
        }

        serde_json::from_str(&body).map_err(|e| UpstreamError::malformed(format!("{e}")))
    }
}

/// Extract a human-readable message from a provider error body.
///
/// Understands `{"error": {"message": ...}}` and `{"error": "..."}`, otherwise
/// returns the trimmed body, or `fallback` when the body is empty.
fn provider_message(
    body: &str,
    fallback: &str,
) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let error = &value["error"];
        if let Some(message) = error["message"].as_str().or_else(|| error.as_str())
            && !message.is_empty()
        {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
