// SPDX-License-Identifier: MIT

//! Parses lines from the hook side-channel (spec §6): one JSON object per
//! line, `{session_id, hook_event_name, ...}`. Recognized sub-types are
//! `idle_prompt` and `permission_prompt`; anything else is warned and
//! dropped, matching the record parser's tolerance for unknown kinds.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    IdlePrompt,
    PermissionPrompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEvent {
    pub session_id: String,
    pub kind: HookKind,
}

#[derive(Deserialize)]
struct RawHookEvent {
    session_id: String,
    hook_event_name: String,
}

pub fn parse_line(line: &str, mut on_warn: impl FnMut(&str)) -> Option<HookEvent> {
    let raw: RawHookEvent = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(err) => {
            on_warn(&format!("malformed hook event line: {err}"));
            return None;
        }
    };

    let kind = match raw.hook_event_name.as_str() {
        "idle_prompt" => HookKind::IdlePrompt,
        "permission_prompt" => HookKind::PermissionPrompt,
        other => {
            on_warn(&format!("unknown hook event name: {other}"));
            return None;
        }
    };

    Some(HookEvent {
        session_id: raw.session_id,
        kind,
    })
}

#[cfg(test)]
#[path = "hooks_tests.rs"]
mod tests;
