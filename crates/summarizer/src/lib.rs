// SPDX-License-Identifier: MIT

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Accumulates per-session activity events and, under a throttled timer,
//! turns them into short spoken narration via a local LLM chat endpoint.

pub mod detail;
mod prompt;

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use ccvr_adapters::locale::summary_failed_message;
use ccvr_adapters::{ChatMessage, LlmAdapter, SpeechQueue};
use ccvr_core::{ActivityEvent, Language, SessionKey, SpeechItem};
use parking_lot::Mutex as SyncMutex;
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;
use tracing::warn;

pub use prompt::{build_system_prompt, build_user_prompt, format_event, select_prompt_events};

/// Default throttle interval between flushes (spec §4.4).
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Default cap on how many activity entries go into one prompt.
pub const DEFAULT_MAX_PROMPT_EVENTS: usize = 10;

/// History kept per session: at most the two most recent summaries.
const HISTORY_CAPACITY: usize = 2;

#[derive(Debug, Error)]
pub enum SummarizerError {
    #[error("summarizer interval must be greater than zero")]
    InvalidInterval,
}

#[derive(Default)]
struct PerSessionState {
    events: HashMap<SessionKey, Vec<ActivityEvent>>,
    history: HashMap<SessionKey, VecDeque<String>>,
}

/// Throttled, LLM-backed narrator of recent activity.
#[derive(Clone)]
pub struct Summarizer<L: LlmAdapter> {
    inner: Arc<Inner<L>>,
}

struct Inner<L: LlmAdapter> {
    llm: L,
    speech: SpeechQueue,
    model: String,
    language: Language,
    interval: Duration,
    max_prompt_events: usize,
    state: SyncMutex<PerSessionState>,
    flush_lock: AsyncMutex<()>,
    active: AtomicBool,
    timer_pending: AtomicBool,
}

impl<L: LlmAdapter> Summarizer<L> {
    pub fn new(
        llm: L,
        speech: SpeechQueue,
        model: impl Into<String>,
        language: Language,
        interval: Duration,
        max_prompt_events: usize,
    ) -> Result<Self, SummarizerError> {
        if interval.is_zero() {
            return Err(SummarizerError::InvalidInterval);
        }
        Ok(Self {
            inner: Arc::new(Inner {
                llm,
                speech,
                model: model.into(),
                language,
                interval,
                max_prompt_events,
                state: SyncMutex::new(PerSessionState::default()),
                flush_lock: AsyncMutex::new(()),
                active: AtomicBool::new(false),
                timer_pending: AtomicBool::new(false),
            }),
        })
    }

    pub fn start(&self) {
        self.inner.active.store(true, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.inner.active.store(false, Ordering::SeqCst);
    }

    /// Append `event` under its session key. If `trigger` is set and the
    /// summarizer is active, a throttled flush is scheduled.
    pub fn record(&self, event: ActivityEvent, trigger: bool) {
        {
            let mut state = self.inner.state.lock();
            state
                .events
                .entry(event.session_key.clone())
                .or_default()
                .push(event);
        }
        if trigger && self.inner.active.load(Ordering::SeqCst) {
            self.schedule_throttled_flush();
        }
    }

    fn schedule_throttled_flush(&self) {
        if self
            .inner
            .timer_pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return; // at most one pending timer
        }
        let summarizer = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(summarizer.inner.interval).await;
            summarizer.inner.timer_pending.store(false, Ordering::SeqCst);
            summarizer.flush_internal().await;
        });
    }

    /// Forced synchronous flush, bypassing the throttle.
    pub async fn flush(&self) {
        self.flush_internal().await;
    }

    async fn flush_internal(&self) {
        let _guard = self.inner.flush_lock.lock().await;

        let snapshot: Vec<(SessionKey, Vec<ActivityEvent>)> = {
            let mut state = self.inner.state.lock();
            let keys: Vec<SessionKey> = state.events.keys().cloned().collect();
            keys.into_iter()
                .filter_map(|key| {
                    let events = state.events.remove(&key)?;
                    if events.is_empty() {
                        None
                    } else {
                        Some((key, events))
                    }
                })
                .collect()
        };

        if snapshot.is_empty() {
            return;
        }

        for (session_key, events) in snapshot {
            self.flush_one(session_key, events).await;
        }

        drop(_guard);

        let has_new_events = !self.inner.state.lock().events.is_empty();
        if has_new_events {
            self.schedule_throttled_flush();
        }
    }

    async fn flush_one(&self, session_key: SessionKey, events: Vec<ActivityEvent>) {
        let event_count = events.len();
        let history = self
            .inner
            .state
            .lock()
            .history
            .get(&session_key)
            .cloned()
            .unwrap_or_default();

        let (lines, elided) = select_prompt_events(&events, self.inner.max_prompt_events);
        let system_prompt = build_system_prompt(self.inner.language, !history.is_empty());
        let user_prompt = build_user_prompt(&history, &lines, elided);

        let messages = vec![ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)];

        match self.inner.llm.chat(&self.inner.model, messages).await {
            Ok(summary) => {
                self.inner.speech.speak(SpeechItem::new(summary.clone()));
                let mut state = self.inner.state.lock();
                let deque = state.history.entry(session_key).or_default();
                deque.push_back(summary);
                while deque.len() > HISTORY_CAPACITY {
                    deque.pop_front();
                }
            }
            Err(err) => {
                warn!(%session_key, error = %err, "summarizer LLM call failed");
                let message = summary_failed_message(self.inner.language, event_count);
                self.inner.speech.speak(SpeechItem::new(message));
            }
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
