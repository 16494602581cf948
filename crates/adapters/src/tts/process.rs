// SPDX-License-Identifier: MIT

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::{TtsAdapter, TtsError};
use crate::subprocess::run_with_timeout;

/// Spawns a configured TTS binary with the message as its final argument.
pub struct ProcessTtsAdapter {
    argv: Vec<String>,
    timeout: Duration,
}

impl ProcessTtsAdapter {
    pub fn new(argv: Vec<String>, timeout: Duration) -> Self {
        Self { argv, timeout }
    }
}

#[async_trait]
impl TtsAdapter for ProcessTtsAdapter {
    async fn speak(&self, message: &str) -> Result<(), TtsError> {
        let Some((program, rest)) = self.argv.split_first() else {
            return Err(TtsError::SpawnFailed("empty speaker command".to_string()));
        };

        let mut cmd = Command::new(program);
        cmd.args(rest).arg(message);

        let output = run_with_timeout(cmd, self.timeout, "TTS process")
            .await
            .map_err(|err| {
                if err.contains("timed out") {
                    TtsError::TimedOut
                } else {
                    TtsError::SpawnFailed(err)
                }
            })?;

        if !output.status.success() {
            return Err(TtsError::NonZeroExit(output.status.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
