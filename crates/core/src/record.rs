// SPDX-License-Identifier: MIT

//! Typed shapes for transcript content the parser is willing to act on.
//!
//! These are *not* wire-format deserialization targets — the wire format is
//! versionless and defensively parsed field-by-field (see `ccvr-parser`).
//! These types are what a transcript line becomes once it has survived that
//! defensive decoding: either a recognized, well-shaped record, or nothing.

use serde_json::Value;

/// A decoded `assistant` / `user` / `system` record that the parser produced
/// enough structure from to act on. Anything that doesn't fit one of these
/// shapes never reaches this type — the parser discards it (with a warning)
/// first.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptRecord {
    Assistant {
        request_id: String,
        content: Vec<ContentBlock>,
    },
    User,
    TurnComplete,
}

/// A single content block inside an `assistant` record's `message.content`.
///
/// `thinking` blocks and any block kind the parser doesn't recognize are
/// dropped before this type is constructed — they carry no information this
/// daemon narrates.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text(String),
    ToolUse { name: String, input: Value },
}
