// SPDX-License-Identifier: MIT

//! Activity events: the reduced stream the summarizer accumulates per
//! session between flushes.

use crate::session::SessionKey;

/// Longest text snippet kept for a narrated assistant message, matching the
/// cap `ccvr-summarizer::detail` applies to `Bash` command details.
const TEXT_SNIPPET_MAX_LEN: usize = 80;

/// One piece of narratable activity, scoped to a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEvent {
    pub session_key: SessionKey,
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivityKind {
    /// A tool invocation, reduced to a short human-readable detail string
    /// by a per-tool extraction rule (see `ccvr-summarizer::detail`).
    ToolUse { tool_name: String, detail: String },
    /// Assistant text, reduced to a short leading snippet.
    Text { snippet: String },
}

impl ActivityEvent {
    pub fn tool_use(session_key: SessionKey, tool_name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            session_key,
            kind: ActivityKind::ToolUse {
                tool_name: tool_name.into(),
                detail: detail.into(),
            },
        }
    }

    pub fn text(session_key: SessionKey, snippet: impl Into<String>) -> Self {
        Self {
            session_key,
            kind: ActivityKind::Text {
                snippet: truncate_chars(&snippet.into(), TEXT_SNIPPET_MAX_LEN),
            },
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ActivityKind::Text { .. })
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_text_distinguishes_kinds() {
        let key = SessionKey::new("-p-app", "s1");
        assert!(ActivityEvent::text(key.clone(), "hi").is_text());
        assert!(!ActivityEvent::tool_use(key, "Read", "/a.ts").is_text());
    }

    #[test]
    fn text_snippet_is_truncated_to_the_cap() {
        let key = SessionKey::new("-p-app", "s1");
        let long_text = "x".repeat(500);
        let event = ActivityEvent::text(key, long_text);
        match event.kind {
            ActivityKind::Text { snippet } => assert_eq!(snippet.chars().count(), TEXT_SNIPPET_MAX_LEN),
            ActivityKind::ToolUse { .. } => unreachable!(),
        }
    }
}
