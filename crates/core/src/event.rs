// SPDX-License-Identifier: MIT

//! The small typed event stream the parser emits from transcript lines.

use serde_json::Value;

/// An event extracted from one transcript line.
///
/// This is the boundary type between the parser and everything downstream
/// (the orchestrator, the summarizer). Its four variants are deliberately
/// exhaustive — there is nothing else in a transcript this daemon narrates.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedEvent {
    /// Non-empty assistant text, grouped by the streaming `requestId`.
    Text { request_id: String, text: String },
    /// An assistant tool invocation.
    ToolUse {
        request_id: String,
        tool_name: String,
        input: Value,
    },
    /// A `system`/`turn_duration` record: the assistant's turn has ended.
    TurnComplete,
    /// A `user` record: the user has produced input.
    UserResponse,
}

impl ExtractedEvent {
    /// The tool name of an `AskUserQuestion` invocation, for the
    /// orchestrator's ask-question deferral (spec §4.5).
    pub const ASK_USER_QUESTION: &'static str = "AskUserQuestion";

    pub fn is_ask_user_question(&self) -> bool {
        matches!(
            self,
            ExtractedEvent::ToolUse { tool_name, .. } if tool_name == Self::ASK_USER_QUESTION
        )
    }
}
