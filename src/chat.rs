use serde::{Deserialize, Serialize};
#[cfg(feature = "server")]
use utoipa::ToSchema;

/// A single conversation turn.
///
/// `role` is a free-form string and is forwarded upstream exactly as received;
/// the provider decides which roles it accepts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct ChatMessage {
    #[cfg_attr(feature = "server", schema(example = "user"))]
    pub role: String,
    #[cfg_attr(feature = "server", schema(example = "Hi"))]
    pub content: String,
}

impl ChatMessage {
    pub fn new(
        role: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Ordered conversation sent by the client. Turn order is preserved upstream.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct ChatResponse {
    /// Text content of the first completion choice.
    #[cfg_attr(feature = "server", schema(example = "Hello!"))]
    pub response: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "server", derive(ToSchema))]
pub struct HealthResponse {
    #[cfg_attr(feature = "server", schema(example = "healthy"))]
    pub status: String,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}
