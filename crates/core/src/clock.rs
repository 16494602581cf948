// SPDX-License-Identifier: MIT

//! Injectable clock so throttle/timeout logic in the summarizer and speech
//! queue can be driven deterministically from tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

/// A source of monotonic milliseconds.
///
/// `std::time::Instant` has no settable constructor, so tests can't fake it
/// directly; this trait is the seam tests substitute instead.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Milliseconds since some arbitrary but fixed epoch.
    fn now_ms(&self) -> u64;
}

/// Real wall-clock time, measured from process start.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

fn process_epoch() -> Instant {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    *EPOCH.get_or_init(Instant::now)
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        process_epoch().elapsed().as_millis() as u64
    }
}

/// A settable clock for tests.
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    millis: std::sync::Arc<AtomicU64>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.millis.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.millis.store(ms, Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}
