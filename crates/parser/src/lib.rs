// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ccvr-parser: turn raw transcript lines into `ExtractedEvent`s.
//!
//! The transcript format is an internal, versionless wire format, so this
//! module is deliberately defensive: anything that doesn't match a
//! recognized shape is warned about and dropped, never propagated as an
//! error. No exception escapes `process`.

use ccvr_core::ExtractedEvent;
use serde_json::Value;

/// Parse a batch of raw NDJSON lines (already newline-stripped) into the
/// extracted event stream, preserving per-line order and the order of
/// events within a line's content blocks.
///
/// `on_warn` is called once per line or block that was malformed or
/// unrecognized; it never aborts processing.
pub fn process(lines: &[String], mut on_warn: impl FnMut(&str)) -> Vec<ExtractedEvent> {
    let mut events = Vec::new();
    for line in lines {
        parse_line(line, &mut events, &mut on_warn);
    }
    events
}

fn parse_line(line: &str, events: &mut Vec<ExtractedEvent>, on_warn: &mut impl FnMut(&str)) {
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            on_warn(&format!("malformed JSON line: {e}"));
            return;
        }
    };

    let Some(obj) = value.as_object() else {
        on_warn("transcript line is not a JSON object");
        return;
    };

    match obj.get("type").and_then(Value::as_str) {
        Some("assistant") => parse_assistant(&value, events, on_warn),
        Some("user") => events.push(ExtractedEvent::UserResponse),
        Some("system") => {
            if obj.get("subtype").and_then(Value::as_str) == Some("turn_duration") {
                events.push(ExtractedEvent::TurnComplete);
            }
            // Other system subtypes are not yet interesting; drop silently.
        }
        Some("progress") | Some("file-history-snapshot") => {
            // Always ignored, by design.
        }
        Some(other) => on_warn(&format!("unknown record type: {other}")),
        None => on_warn("transcript line missing \"type\" field"),
    }
}

fn parse_assistant(value: &Value, events: &mut Vec<ExtractedEvent>, on_warn: &mut impl FnMut(&str)) {
    let Some(request_id) = value.get("requestId").and_then(Value::as_str) else {
        on_warn("assistant record missing requestId");
        return;
    };

    let Some(blocks) = value.pointer("/message/content").and_then(Value::as_array) else {
        on_warn("assistant record missing message.content");
        return;
    };

    for block in blocks {
        parse_content_block(request_id, block, events, on_warn);
    }
}

fn parse_content_block(
    request_id: &str,
    block: &Value,
    events: &mut Vec<ExtractedEvent>,
    on_warn: &mut impl FnMut(&str),
) {
    match block.get("type").and_then(Value::as_str) {
        Some("text") => match block.get("text").and_then(Value::as_str) {
            Some(text) if !text.trim().is_empty() => events.push(ExtractedEvent::Text {
                request_id: request_id.to_string(),
                text: text.to_string(),
            }),
            Some(_) => {} // empty/whitespace-only text is not narratable
            None => on_warn("text content block missing \"text\" field"),
        },
        Some("tool_use") => match block.get("name").and_then(Value::as_str) {
            Some(name) => events.push(ExtractedEvent::ToolUse {
                request_id: request_id.to_string(),
                tool_name: name.to_string(),
                input: block.get("input").cloned().unwrap_or_else(|| Value::Object(Default::default())),
            }),
            None => on_warn("tool_use content block missing \"name\" field"),
        },
        // `thinking` and any unrecognized block kind are expected to evolve;
        // silently skipped per spec.
        _ => {}
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
