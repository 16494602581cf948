// SPDX-License-Identifier: MIT

//! A directory tailer: watches a root directory (to a bounded depth) for
//! `.jsonl` files and emits newly appended, complete lines from each.
//!
//! Used twice by the daemon: once over the Claude projects directory
//! (depth 4, for transcripts and their `subagents/` children) and once
//! over the hooks side-channel directory (depth 1).
//!
//! Grounded on the same notify-plus-fallback-poll shape as a conventional
//! log tailer: `notify` gives low-latency wakeups, a periodic rescan
//! catches anything notify misses (including the root directory itself
//! appearing after startup) and re-discovers new files.

pub mod pure;

pub use pure::{extract_project_dir, extract_session_id, is_subagent};

use pure::{find_jsonl_files, read_increment};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Fallback rescan interval; also the interval at which a not-yet-existing
/// root directory is retried.
const POLL_INTERVAL: Duration = Duration::from_millis(750);

/// A batch of newly observed lines from one file, or a recoverable error.
#[derive(Debug, Clone)]
pub enum TailEvent {
    Lines { path: PathBuf, lines: Vec<String> },
    Error { path: Option<PathBuf>, message: String },
}

/// Handle to a running tailer task.
pub struct TailerHandle {
    receiver: mpsc::Receiver<TailEvent>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TailerHandle {
    pub async fn recv(&mut self) -> Option<TailEvent> {
        self.receiver.recv().await
    }

    /// Ask the tailer to stop and wait for it to finish.
    pub async fn close(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = self.task.await;
    }
}

/// Start tailing `root` to `max_depth`. Never fails on a missing root: the
/// tailer stays alive and picks the directory up if it appears later.
pub fn start(root: PathBuf, max_depth: usize) -> TailerHandle {
    let (tx, rx) = mpsc::channel(256);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let task = tokio::spawn(run(root, max_depth, tx, shutdown_rx));

    TailerHandle {
        receiver: rx,
        shutdown_tx: Some(shutdown_tx),
        task,
    }
}

async fn run(
    root: PathBuf,
    max_depth: usize,
    tx: mpsc::Sender<TailEvent>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let mut offsets: HashMap<PathBuf, u64> = HashMap::new();
    // Initial scan: record current sizes without emitting, matching
    // "only new activity going forward" at startup.
    for path in find_jsonl_files(&root, max_depth) {
        if let Ok(meta) = std::fs::metadata(&path) {
            offsets.insert(path, meta.len());
        }
    }

    let (notify_tx, mut notify_rx) = mpsc::channel::<()>(16);
    let mut watcher = build_watcher(&root, notify_tx.clone());

    let mut poll = tokio::time::interval(POLL_INTERVAL);
    poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                debug!(root = %root.display(), "tailer shutting down");
                return;
            }
            _ = notify_rx.recv() => {
                // Debounce: drain any further wakeups that arrive immediately.
                while notify_rx.try_recv().is_ok() {}
                reconcile(&root, max_depth, &mut offsets, &tx).await;
            }
            _ = poll.tick() => {
                if watcher.is_none() {
                    watcher = build_watcher(&root, notify_tx.clone());
                }
                reconcile(&root, max_depth, &mut offsets, &tx).await;
            }
        }
    }
}

fn build_watcher(root: &Path, notify_tx: mpsc::Sender<()>) -> Option<RecommendedWatcher> {
    if !root.exists() {
        return None;
    }
    let mut watcher = match notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if res.is_ok() {
            let _ = notify_tx.try_send(());
        }
    }) {
        Ok(w) => w,
        Err(err) => {
            warn!(error = %err, "failed to build filesystem watcher");
            return None;
        }
    };
    if let Err(err) = watcher.watch(root, RecursiveMode::Recursive) {
        warn!(root = %root.display(), error = %err, "failed to watch directory");
        return None;
    }
    Some(watcher)
}

async fn reconcile(
    root: &Path,
    max_depth: usize,
    offsets: &mut HashMap<PathBuf, u64>,
    tx: &mpsc::Sender<TailEvent>,
) {
    for path in find_jsonl_files(root, max_depth) {
        let tracked = *offsets.get(&path).unwrap_or(&0);
        let path_for_blocking = path.clone();
        let step = tokio::task::spawn_blocking(move || read_increment(&path_for_blocking, tracked)).await;

        match step {
            Ok(Ok(step)) => {
                offsets.insert(path.clone(), step.new_offset);
                if !step.lines.is_empty() {
                    let _ = tx
                        .send(TailEvent::Lines {
                            path,
                            lines: step.lines,
                        })
                        .await;
                }
            }
            Ok(Err(io_err)) => {
                let _ = tx
                    .send(TailEvent::Error {
                        path: Some(path),
                        message: io_err.to_string(),
                    })
                    .await;
            }
            Err(join_err) => {
                let _ = tx
                    .send(TailEvent::Error {
                        path: Some(path),
                        message: join_err.to_string(),
                    })
                    .await;
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
