// SPDX-License-Identifier: MIT

//! The four notification priority levels (spec §4.5), ordered so that
//! `NotificationLevel::AskQuestion > NotificationLevel::TurnComplete`.

/// Notification priority, highest first in narrative order but ordered
/// lowest-to-highest by discriminant so `Ord`/`PartialOrd` read naturally:
/// `L1 < L2 < L3 < L4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NotificationLevel {
    /// L1: `turn_complete` (main session only).
    TurnComplete,
    /// L2: hook event, `permission_prompt`.
    PermissionPrompt,
    /// L3: hook event, `idle_prompt`.
    IdlePrompt,
    /// L4: `AskUserQuestion` tool use.
    AskQuestion,
}

impl NotificationLevel {
    pub const ALL: [NotificationLevel; 4] = [
        NotificationLevel::TurnComplete,
        NotificationLevel::PermissionPrompt,
        NotificationLevel::IdlePrompt,
        NotificationLevel::AskQuestion,
    ];
}
