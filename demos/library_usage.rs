//! Example demonstrating how to use chat-relay as a library
//!
//! This example drives `ChatService` directly, without starting the HTTP server.
//!
//! To run this example:
//! 1. Set your API key: export OPENAI_API_KEY=your-key-here
//! 2. Optionally point at a compatible gateway: export OPENAI_BASE_URL=http://localhost:8080/v1
//! 3. Run: cargo run --example `library_usage` --no-default-features

use async_trait::async_trait;
use chat_relay::{
    ChatMessage, ChatRequest, ChatService, CompletionBackend, CompletionRequest, CompletionResponse, Config,
    UpstreamError, UpstreamSettings,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing for logging (only if tracing_subscriber is available)
    #[cfg(feature = "server")]
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    println!("=== chat-relay Library Usage Examples ===\n");

    // Example 1: A service built from the environment, talking to the real provider
    println!("Example 1: ChatService from environment");
    println!("=======================================");
    example_from_env().await?;

    // Example 2: A service over a custom backend, useful offline and in tests
    println!("\nExample 2: ChatService with a custom backend");
    println!("============================================");
    example_with_custom_backend().await?;

    println!("\n=== All examples completed successfully! ===");
    Ok(())
}

async fn example_from_env() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    if config.api_key.is_none() {
        println!("OPENAI_API_KEY is not set, skipping the live request");
        return Ok(());
    }

    let service = ChatService::from_config(&config);
    let request = ChatRequest {
        messages: vec![
            ChatMessage::new("system", "Answer in one sentence."),
            ChatMessage::new("user", "What is a relay?"),
        ],
    };

    match service.chat(&request).await {
        Ok(reply) => println!("Reply: {}", reply.response),
        Err(e) => println!("Request failed ({}): {e}", e.kind()),
    }

    Ok(())
}

/// Backend that echoes the last message back.
struct EchoBackend;

#[async_trait]
impl CompletionBackend for EchoBackend {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, UpstreamError> {
        let last = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .ok_or_else(|| UpstreamError::from_status(400, "messages must not be empty"))?;

        Ok(CompletionResponse::with_content(format!("echo: {last}")))
    }
}

async fn example_with_custom_backend() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service = ChatService::new(UpstreamSettings::default(), Arc::new(EchoBackend));

    let request = ChatRequest {
        messages: vec![ChatMessage::new("user", "Hi")],
    };
    let reply = service.chat(&request).await?;
    println!("Reply: {}", reply.response);

    // An empty conversation is forwarded as-is; this backend rejects it
    if let Err(e) = service.chat(&ChatRequest::default()).await {
        println!("Empty conversation rejected upstream ({}): {e}", e.kind());
    }

    Ok(())
}
