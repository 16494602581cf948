// SPDX-License-Identifier: MIT

//! Local LLM chat-endpoint adapter (spec §6: `POST {baseUrl}/api/chat`,
//! `GET {baseUrl}/api/tags`).

mod http;

pub use http::HttpLlmAdapter;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLlmAdapter, LlmCall};

use async_trait::async_trait;
use thiserror::Error;

/// One message in a chat request.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("unexpected response status: {0}")]
    Status(u16),
    #[error("response did not match the expected schema: {0}")]
    Schema(String),
}

/// Adapter over the local chat-completion endpoint.
#[async_trait]
pub trait LlmAdapter: Send + Sync + 'static {
    /// Call the non-streaming chat endpoint with `model` and `messages`,
    /// returning the assistant's reply text.
    async fn chat(&self, model: &str, messages: Vec<ChatMessage>) -> Result<String, LlmError>;

    /// List installed model names (spec §6: each entry's `name` field).
    async fn list_models(&self) -> Result<Vec<String>, LlmError>;
}
