// SPDX-License-Identifier: MIT

//! TTS process adapter (spec §6: `execFile(cmd[0], [...cmd[1..], message])`).

mod process;

pub use process::ProcessTtsAdapter;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeTtsAdapter, TtsCall};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TtsError {
    #[error("failed to spawn TTS process: {0}")]
    SpawnFailed(String),
    #[error("TTS process exited with status {0}")]
    NonZeroExit(String),
    #[error("TTS process timed out")]
    TimedOut,
}

/// Speaks a single message by invoking an external binary. Implementations
/// must run at most one invocation at a time per instance — the speech
/// queue relies on this to enforce spec §3's "exactly one TTS child
/// process alive at any moment" invariant by never calling `speak` again
/// before the previous call resolves.
#[async_trait]
pub trait TtsAdapter: Send + Sync + 'static {
    async fn speak(&self, message: &str) -> Result<(), TtsError>;
}
