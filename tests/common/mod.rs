#![allow(dead_code)]

pub mod mock_upstream;

use async_trait::async_trait;
use chat_relay::{CompletionBackend, CompletionRequest, CompletionResponse, UpstreamError};
use std::sync::{Arc, Mutex};

/// Scripted reply of a [`FakeBackend`].
#[derive(Clone)]
pub enum FakeReply {
    Content(String),
    Status(u16, String),
    NoChoices,
}

/// In-process backend that records every request it receives.
pub struct FakeBackend {
    reply: FakeReply,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl FakeBackend {
    pub fn new(reply: FakeReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(content: &str) -> Arc<Self> {
        Self::new(FakeReply::Content(content.to_string()))
    }

    pub fn seen(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for FakeBackend {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, UpstreamError> {
        self.seen.lock().unwrap().push(request.clone());
        match &self.reply {
            FakeReply::Content(content) => Ok(CompletionResponse::with_content(content.clone())),
            FakeReply::Status(status, message) => Err(UpstreamError::from_status(*status, message.clone())),
            FakeReply::NoChoices => Ok(CompletionResponse { choices: Vec::new() }),
        }
    }
}
