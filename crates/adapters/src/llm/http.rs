// SPDX-License-Identifier: MIT

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{ChatMessage, LlmAdapter, LlmError};

/// `reqwest`-backed adapter over an Ollama-compatible local chat endpoint.
pub struct HttpLlmAdapter {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpLlmAdapter {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<TagsModel>,
}

#[derive(Deserialize)]
struct TagsModel {
    name: String,
}

#[async_trait]
impl LlmAdapter for HttpLlmAdapter {
    async fn chat(&self, model: &str, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let body = json!({
            "model": model,
            "stream": false,
            "messages": messages.into_iter().map(|m| json!({"role": m.role, "content": m.content})).collect::<Vec<_>>(),
        });

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    LlmError::Timeout(self.timeout)
                } else {
                    LlmError::Request(err.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(LlmError::Status(response.status().as_u16()));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| LlmError::Schema(err.to_string()))?;
        Ok(parsed.message.content)
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    LlmError::Timeout(self.timeout)
                } else {
                    LlmError::Request(err.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(LlmError::Status(response.status().as_u16()));
        }

        let parsed: TagsResponse = response
            .json()
            .await
            .map_err(|err| LlmError::Schema(err.to_string()))?;
        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
