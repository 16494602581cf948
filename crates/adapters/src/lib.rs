// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! External-IO adapters: the transcript/hook tailer, the TTS process
//! adapter, the LLM HTTP adapter, the speech queue, and the glue around
//! project display names, locale, and TTS/model autodetection.

pub mod autodetect;
pub mod llm;
pub mod locale;
pub mod project;
pub mod speech;
pub mod subprocess;
pub mod tailer;
pub mod tts;

pub use llm::{ChatMessage, HttpLlmAdapter, LlmAdapter, LlmError};
pub use speech::SpeechQueue;
pub use tailer::{TailEvent, TailerHandle};
pub use tts::{ProcessTtsAdapter, TtsAdapter, TtsError};

#[cfg(any(test, feature = "test-support"))]
pub use llm::{FakeLlmAdapter, LlmCall};
#[cfg(any(test, feature = "test-support"))]
pub use tts::{FakeTtsAdapter, TtsCall};
