// SPDX-License-Identifier: MIT

//! Fake LLM adapter for testing the summarizer without a network call.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{ChatMessage, LlmAdapter, LlmError};

#[derive(Debug, Clone)]
pub struct LlmCall {
    pub model: String,
    pub messages: Vec<String>,
}

struct FakeLlmState {
    calls: Vec<LlmCall>,
    next_reply: Result<String, LlmError>,
    models: Vec<String>,
}

#[derive(Clone)]
pub struct FakeLlmAdapter {
    inner: Arc<Mutex<FakeLlmState>>,
}

impl Default for FakeLlmAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeLlmState {
                calls: Vec::new(),
                next_reply: Ok("a summary".to_string()),
                models: Vec::new(),
            })),
        }
    }
}

impl FakeLlmAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_next_reply(&self, reply: Result<String, LlmError>) {
        self.inner.lock().next_reply = reply;
    }

    pub fn set_models(&self, models: Vec<String>) {
        self.inner.lock().models = models;
    }

    pub fn calls(&self) -> Vec<LlmCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl LlmAdapter for FakeLlmAdapter {
    async fn chat(&self, model: &str, messages: Vec<ChatMessage>) -> Result<String, LlmError> {
        let mut state = self.inner.lock();
        state.calls.push(LlmCall {
            model: model.to_string(),
            messages: messages.into_iter().map(|m| m.content).collect(),
        });
        match &state.next_reply {
            Ok(reply) => Ok(reply.clone()),
            Err(LlmError::Status(code)) => Err(LlmError::Status(*code)),
            Err(LlmError::Timeout(d)) => Err(LlmError::Timeout(*d)),
            Err(LlmError::Request(m)) => Err(LlmError::Request(m.clone())),
            Err(LlmError::Schema(m)) => Err(LlmError::Schema(m.clone())),
        }
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        Ok(self.inner.lock().models.clone())
    }
}
