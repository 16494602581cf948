// SPDX-License-Identifier: MIT

//! Session-aware speech queue: a single logical worker over a tagged
//! priority queue, running one TTS child process at a time.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ccvr_core::{Language, SpeechItem};
use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::locale::{project_switch_announcement, truncate_message};
use crate::tts::TtsAdapter;

struct QueuedItem {
    item: SpeechItem,
    already_announced: bool,
}

struct State {
    queue: VecDeque<QueuedItem>,
    current_project: Option<ccvr_core::ProjectDescriptor>,
    current_session: Option<ccvr_core::SessionKey>,
}

/// A single-worker, session/project-aware speech queue.
///
/// Cloning shares the same underlying queue and worker; the background
/// worker task is spawned once, at construction, and lives until
/// `dispose()` or the queue is dropped.
#[derive(Clone)]
pub struct SpeechQueue {
    state: Arc<Mutex<State>>,
    wake: Arc<Notify>,
    accepting: Arc<AtomicBool>,
    is_speaking: Arc<AtomicBool>,
    in_flight: Arc<Mutex<Option<JoinHandle<()>>>>,
    max_length: usize,
    language: Language,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SpeechQueue {
    pub fn new(tts: impl TtsAdapter, language: Language, max_length: usize) -> Self {
        let queue = Self {
            state: Arc::new(Mutex::new(State {
                queue: VecDeque::new(),
                current_project: None,
                current_session: None,
            })),
            wake: Arc::new(Notify::new()),
            accepting: Arc::new(AtomicBool::new(true)),
            is_speaking: Arc::new(AtomicBool::new(false)),
            in_flight: Arc::new(Mutex::new(None)),
            max_length,
            language,
            worker: Arc::new(Mutex::new(None)),
        };

        let tts = Arc::new(tts);
        let handle = tokio::spawn(run_worker(queue.clone(), tts));
        *queue.worker.lock() = Some(handle);
        queue
    }

    /// Enqueue a message; returns immediately. Rejected (silently dropped)
    /// if the queue is no longer accepting work (after `stop_gracefully`
    /// or `dispose`).
    pub fn speak(&self, mut item: SpeechItem) {
        if !self.accepting.load(Ordering::SeqCst) {
            return;
        }
        item.message = truncate_message(&item.message, self.max_length);
        self.state.lock().queue.push_back(QueuedItem {
            item,
            already_announced: false,
        });
        self.wake.notify_one();
    }

    /// Remove all queued (not yet dequeued) items whose `cancel_tag`
    /// equals `tag`. Never touches the item currently being spoken.
    pub fn cancel_by_tag(&self, tag: &str) {
        let mut state = self.state.lock();
        state
            .queue
            .retain(|queued| queued.item.cancel_tag.as_deref() != Some(tag));
    }

    pub fn pending(&self) -> usize {
        self.state.lock().queue.len()
    }

    pub fn is_speaking(&self) -> bool {
        self.is_speaking.load(Ordering::SeqCst)
    }

    /// Stop accepting new items, drop everything still queued, and wait
    /// for any in-flight item to finish naturally.
    pub async fn stop_gracefully(&self) {
        self.accepting.store(false, Ordering::SeqCst);
        self.state.lock().queue.clear();
        while self.is_speaking.load(Ordering::SeqCst) {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    }

    /// Stop accepting new items, drop everything queued, and kill the
    /// in-flight item immediately. Safe to call more than once.
    pub fn dispose(&self) {
        self.accepting.store(false, Ordering::SeqCst);
        self.state.lock().queue.clear();
        if let Some(handle) = self.in_flight.lock().take() {
            handle.abort();
        }
        self.is_speaking.store(false, Ordering::SeqCst);
        if let Some(handle) = self.worker.lock().take() {
            handle.abort();
        }
    }
}

/// Result of a single dequeue-next decision: either a real item (which
/// updates `current_project`/`current_session`) or a synthesized,
/// untagged project-switch announcement.
enum Selection {
    Item(SpeechItem),
    Announcement(String),
}

fn select_index(
    queue: &VecDeque<QueuedItem>,
    current_project: &Option<ccvr_core::ProjectDescriptor>,
    current_session: &Option<ccvr_core::SessionKey>,
) -> usize {
    if let (Some(project), Some(session)) = (current_project, current_session) {
        if let Some(idx) = queue
            .iter()
            .position(|q| q.item.project.as_ref() == Some(project) && q.item.session.as_ref() == Some(session))
        {
            return idx;
        }
    }
    if let Some(project) = current_project {
        if let Some(idx) = queue.iter().position(|q| q.item.project.as_ref() == Some(project)) {
            return idx;
        }
    }
    0
}

fn dequeue_next(state: &mut State, language: Language) -> Option<Selection> {
    if state.queue.is_empty() {
        return None;
    }
    let idx = select_index(&state.queue, &state.current_project, &state.current_session);
    let is_project_switch = {
        let candidate = &state.queue[idx];
        !candidate.already_announced
            && state.current_project.is_some()
            && candidate.item.project.is_some()
            && candidate.item.project != state.current_project
    };

    if is_project_switch {
        // idx came from select_index, which only ever returns a position found via
        // queue.iter().position, so the slot is always occupied.
        #[allow(clippy::expect_used)]
        let mut candidate = state.queue.remove(idx).expect("idx came from this queue");
        let display_name = candidate
            .item
            .project
            .as_ref()
            .map(|p| p.display_name.clone())
            .unwrap_or_default();
        candidate.already_announced = true;
        state.queue.push_front(candidate);
        return Some(Selection::Announcement(project_switch_announcement(
            language,
            &display_name,
        )));
    }

    // Same invariant as above: idx was just returned by select_index over this queue.
    #[allow(clippy::expect_used)]
    let candidate = state.queue.remove(idx).expect("idx came from this queue");
    state.current_project = candidate.item.project.clone();
    state.current_session = candidate.item.session.clone();
    Some(Selection::Item(candidate.item))
}

async fn run_worker(queue: SpeechQueue, tts: Arc<dyn TtsAdapter>) {
    loop {
        let selection = {
            let mut state = queue.state.lock();
            dequeue_next(&mut state, queue.language)
        };

        let message = match selection {
            Some(Selection::Item(item)) => item.message,
            Some(Selection::Announcement(text)) => text,
            None => {
                queue.wake.notified().await;
                continue;
            }
        };

        queue.is_speaking.store(true, Ordering::SeqCst);
        let tts = Arc::clone(&tts);
        let handle = tokio::spawn(async move {
            if let Err(err) = tts.speak(&message).await {
                warn!(error = %err, "TTS invocation failed");
            }
        });
        *queue.in_flight.lock() = Some(handle);

        let in_flight = queue.in_flight.lock().take();
        if let Some(handle) = in_flight {
            let _ = handle.await;
        }

        queue.is_speaking.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "speech_tests.rs"]
mod tests;
