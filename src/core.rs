//! Core relay logic shared by the HTTP server and library callers.

use crate::chat::{ChatRequest, ChatResponse, HealthResponse};
use crate::config::{Config, UpstreamSettings};
use crate::error::UpstreamError;
use crate::upstream::{CompletionBackend, CompletionRequest, OpenAiClient};
use std::sync::Arc;

/// Forwards conversations to the upstream provider.
///
/// Holds no per-request state, so one instance is shared by every worker.
#[derive(Clone)]
pub struct ChatService {
    settings: UpstreamSettings,
    backend: Arc<dyn CompletionBackend>,
}

impl ChatService {
    pub fn new(
        settings: UpstreamSettings,
        backend: Arc<dyn CompletionBackend>,
    ) -> Self {
        Self { settings, backend }
    }

    /// Service backed by a real [`OpenAiClient`] built from `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.upstream.clone(), Arc::new(OpenAiClient::from_config(config)))
    }

    #[must_use]
    pub fn settings(&self) -> &UpstreamSettings {
        &self.settings
    }

    /// Forward `request` upstream and return the first choice's text.
    ///
    /// Messages are sent in the order received, with their roles untouched.
    /// An empty conversation is forwarded as-is.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] if the call fails or the reply has no usable
    /// first choice. Nothing is retried.
    pub async fn chat(
        &self,
        request: &ChatRequest,
    ) -> Result<ChatResponse, UpstreamError> {
        let completion_request = CompletionRequest::new(&self.settings, request.messages.clone());

        tracing::debug!(
            "Forwarding {} message(s) to model {}",
            completion_request.messages.len(),
            completion_request.model
        );

        let completion = self.backend.complete(&completion_request).await?;
        let response = completion.into_first_content()?;

        Ok(ChatResponse { response })
    }

    /// Liveness marker. Does not check the upstream.
    #[must_use]
    pub fn health(&self) -> HealthResponse {
        HealthResponse::healthy()
    }
}
