//! # chat-relay
//!
//! A minimal HTTP relay that forwards chat conversations to an
//! OpenAI-compatible chat-completion API and returns the generated reply.
//!
//! ## Features
//!
//! - **`POST /api/chat`**: forwards `{"messages": [...]}` upstream in order and
//!   returns `{"response": "..."}` with the first choice's text
//! - **`GET /api/health`**: unconditional liveness marker
//! - **Permissive CORS**: any origin, method and header, credentials allowed
//! - **Typed failures**: transport, authentication, provider and malformed
//!   response errors are distinguished internally and reported as HTTP 500
//!
//! ## Library Usage
//!
//! The forwarding core can be used without the HTTP server:
//!
//! ```toml
//! [dependencies]
//! chat-relay = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,no_run
//! use chat_relay::{ChatMessage, ChatRequest, ChatService, Config};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = Config::from_env()?;
//! let service = ChatService::from_config(&config);
//!
//! let request = ChatRequest {
//!     messages: vec![ChatMessage::new("user", "Hi")],
//! };
//!
//! let reply = service.chat(&request).await?;
//! println!("{}", reply.response);
//! # Ok(())
//! # }
//! ```
//!
//! ## Server Mode
//!
//! With the default `server` feature, run the binary:
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run
//! ```

// Core modules - always available
pub mod chat;
pub mod config;
pub mod core;
pub mod error;
pub mod upstream;

// Server-specific modules - only when server feature is enabled
#[cfg(feature = "server")]
pub mod server;

pub use crate::core::ChatService;
pub use chat::{ChatMessage, ChatRequest, ChatResponse, HealthResponse};
pub use config::{Config, UpstreamSettings};
pub use error::{ErrorResponse, UpstreamError};
pub use upstream::{CompletionBackend, CompletionRequest, CompletionResponse, OpenAiClient};
