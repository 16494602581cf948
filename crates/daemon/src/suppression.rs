// SPDX-License-Identifier: MIT

//! Per-session notification suppression (spec §4.5): a notification of
//! level `L` is dropped if a higher level has already been spoken for that
//! session since the last activity reset.

use std::collections::HashMap;

use ccvr_core::{NotificationLevel, SessionKey};
use parking_lot::Mutex;

#[derive(Default)]
pub struct SuppressionTracker {
    highest_spoken: Mutex<HashMap<SessionKey, NotificationLevel>>,
}

impl SuppressionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a notification at `level` should be dropped for `session`.
    pub fn is_suppressed(&self, session: &SessionKey, level: NotificationLevel) -> bool {
        self.highest_spoken
            .lock()
            .get(session)
            .is_some_and(|&highest| highest > level)
    }

    /// Record that a notification at `level` was actually spoken.
    pub fn record_spoken(&self, session: SessionKey, level: NotificationLevel) {
        let mut map = self.highest_spoken.lock();
        map.entry(session)
            .and_modify(|highest| {
                if level > *highest {
                    *highest = level;
                }
            })
            .or_insert(level);
    }

    /// Clear all suppression state for `session` (an activity reset).
    pub fn reset(&self, session: &SessionKey) {
        self.highest_spoken.lock().remove(session);
    }
}

#[cfg(test)]
#[path = "suppression_tests.rs"]
mod tests;
