// SPDX-License-Identifier: MIT

//! Fake TTS adapter for speech-queue tests: records invocations instead
//! of spawning a process, and can simulate a hang (for timeout tests) or
//! a failure.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::{TtsAdapter, TtsError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsCall {
    pub message: String,
}

enum Behavior {
    Succeed,
    Fail,
    HangForever,
}

struct FakeTtsState {
    calls: Vec<TtsCall>,
    behavior: Behavior,
}

/// Fake TTS adapter for testing.
#[derive(Clone)]
pub struct FakeTtsAdapter {
    inner: Arc<Mutex<FakeTtsState>>,
    in_flight: Arc<Notify>,
}

impl Default for FakeTtsAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeTtsState {
                calls: Vec::new(),
                behavior: Behavior::Succeed,
            })),
            in_flight: Arc::new(Notify::new()),
        }
    }
}

impl FakeTtsAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<TtsCall> {
        self.inner.lock().calls.clone()
    }

    pub fn set_failing(&self) {
        self.inner.lock().behavior = Behavior::Fail;
    }

    pub fn set_hangs_forever(&self) {
        self.inner.lock().behavior = Behavior::HangForever;
    }

    /// Resolve a pending `HangForever` speak call, as if the process
    /// finally exited.
    pub fn release_hang(&self) {
        self.in_flight.notify_one();
    }
}

#[async_trait]
impl TtsAdapter for FakeTtsAdapter {
    async fn speak(&self, message: &str) -> Result<(), TtsError> {
        let behavior_is_hang = {
            let mut state = self.inner.lock();
            state.calls.push(TtsCall {
                message: message.to_string(),
            });
            matches!(state.behavior, Behavior::HangForever)
        };

        if behavior_is_hang {
            self.in_flight.notified().await;
            return Ok(());
        }

        let should_fail = matches!(self.inner.lock().behavior, Behavior::Fail);
        if should_fail {
            return Err(TtsError::NonZeroExit("1".to_string()));
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
        Ok(())
    }
}
