//! Provider-neutral completion types and errors.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by completion client operations.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The HTTP request to the completion service failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The completion service returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The completion service response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The completion service returned zero candidate completions.
    #[error("no response generated")]
    EmptyCompletion,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// MESSAGE TYPES
// =============================================================================

/// Message role in a chat completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single role-tagged message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

// =============================================================================
// COMPLETION TRAIT
// =============================================================================

/// Provider-neutral async trait for chat completion. Enables mocking in tests.
///
/// The API key is a per-call argument rather than client state: each request
/// draws a fresh credential from the pool.
#[async_trait::async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send one completion request and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns a [`CompletionError`] if the request fails, the response is
    /// malformed, or the service produced zero candidates.
    async fn complete(
        &self,
        api_key: &str,
        system: &str,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, CompletionError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
