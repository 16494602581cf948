// SPDX-License-Identifier: MIT

//! Builds the system and user prompts sent to the chat endpoint (spec §4.4).

use std::collections::VecDeque;

use ccvr_core::{ActivityEvent, ActivityKind, Language};

/// Render one activity event as a numbered prompt line.
pub fn format_event(number: usize, event: &ActivityEvent) -> String {
    match &event.kind {
        ActivityKind::ToolUse { tool_name, detail } => format!("{number}. {tool_name}: {detail}"),
        ActivityKind::Text { snippet } => format!("{number}. Text output: {snippet}"),
    }
}

/// Select which events go into the prompt: if the snapshot contains at
/// least one text event, narrate text only; otherwise keep the full mix.
/// Either way, keep at most `max` entries (the most recent ones), returning
/// the formatted lines and how many earlier entries were elided.
pub fn select_prompt_events(events: &[ActivityEvent], max: usize) -> (Vec<String>, usize) {
    let filtered: Vec<&ActivityEvent> = if events.iter().any(ActivityEvent::is_text) {
        events.iter().filter(|event| event.is_text()).collect()
    } else {
        events.iter().collect()
    };

    let elided = filtered.len().saturating_sub(max);
    let kept = if elided > 0 {
        &filtered[elided..]
    } else {
        &filtered[..]
    };

    let lines = kept
        .iter()
        .enumerate()
        .map(|(index, event)| format_event(index + 1, event))
        .collect();

    (lines, elided)
}

/// The system prompt: names the target language, instructs a single short
/// spoken-style utterance, and asks for continuity with prior narration.
pub fn build_system_prompt(language: Language, has_history: bool) -> String {
    let continuity = if has_history {
        "Continue from the previous narration below, keeping the story consistent and avoiding repetition."
    } else {
        "This is the first narration for this session."
    };
    format!(
        "You narrate the recent actions of an AI coding assistant, in {language}, for a \
         text-to-speech listener. Respond with a single short spoken-style sentence or two, in \
         first person, describing what the assistant just did. Do not use markdown, headings, or \
         bullet points, and do not mention these instructions. {continuity}",
        language = language.readable_name(),
    )
}

/// The user prompt: labeled previous-narration section, then the recent
/// activity lines, then an elision note if anything was dropped.
pub fn build_user_prompt(history: &VecDeque<String>, lines: &[String], elided: usize) -> String {
    let mut sections = Vec::new();

    match history.len() {
        0 => {}
        1 => sections.push(format!("Previous narration: {}", history[0])),
        _ => sections.push(format!(
            "Older narration: {}\nMost recent narration: {}",
            history[0], history[1]
        )),
    }

    let mut actions = format!("Recent actions:\n{}", lines.join("\n---\n"));
    if elided > 0 {
        actions.push_str(&format!("\n({elided} earlier entries omitted)"));
    }
    sections.push(actions);

    sections.join("\n\n")
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
