// SPDX-License-Identifier: MIT

//! Per-tool detail extraction: reduces a tool invocation's JSON `input` to
//! a short human-readable string, per spec §4.4's extraction table.

use serde_json::Value;

/// Longest `input.command` substring kept for a `Bash` invocation.
const BASH_COMMAND_MAX_LEN: usize = 80;

/// Extract the detail string the summarizer narrates for `tool_name` given
/// its raw `input`. Falls back to `"used <tool_name>"` for anything not in
/// the table.
pub fn extract(tool_name: &str, input: &Value) -> String {
    match tool_name {
        "Read" | "Write" | "Edit" => input
            .get("file_path")
            .or_else(|| input.get("path"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("used {tool_name}")),
        "Bash" => input
            .get("command")
            .and_then(Value::as_str)
            .map(|command| truncate_chars(command, BASH_COMMAND_MAX_LEN))
            .unwrap_or_else(|| format!("used {tool_name}")),
        "Grep" | "Glob" => input
            .get("pattern")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("used {tool_name}")),
        "AskUserQuestion" => input
            .get("questions")
            .and_then(Value::as_array)
            .and_then(|questions| questions.first())
            .and_then(|question| question.get("question"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("used {tool_name}")),
        "TodoWrite" => "updated todo list".to_string(),
        other => format!("used {other}"),
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
    use serde_json::json;

    #[test]
    fn read_write_edit_use_file_path() {
        let input = json!({"file_path": "/a/b.rs"});
        assert_eq!(extract("Read", &input), "/a/b.rs");
        assert_eq!(extract("Write", &input), "/a/b.rs");
        assert_eq!(extract("Edit", &input), "/a/b.rs");
    }

    #[test]
    fn read_write_edit_fall_back_to_path_field() {
        let input = json!({"path": "/a/b.rs"});
        assert_eq!(extract("Read", &input), "/a/b.rs");
    }

    #[test]
    fn bash_truncates_long_commands() {
        let long_command = "x".repeat(200);
        let input = json!({"command": long_command});
        assert_eq!(extract("Bash", &input).chars().count(), BASH_COMMAND_MAX_LEN);
    }

    #[test]
    fn bash_keeps_short_commands_whole() {
        let input = json!({"command": "ls -la"});
        assert_eq!(extract("Bash", &input), "ls -la");
    }

    #[test]
    fn grep_and_glob_use_pattern() {
        let input = json!({"pattern": "TODO"});
        assert_eq!(extract("Grep", &input), "TODO");
        assert_eq!(extract("Glob", &input), "TODO");
    }

    #[test]
    fn ask_user_question_uses_first_question() {
        let input = json!({"questions": [{"question": "Which approach?"}, {"question": "ignored"}]});
        assert_eq!(extract("AskUserQuestion", &input), "Which approach?");
    }

    #[test]
    fn todo_write_has_fixed_detail() {
        assert_eq!(extract("TodoWrite", &json!({})), "updated todo list");
    }

    #[test]
    fn unrecognized_tool_falls_back_to_used_name() {
        assert_eq!(extract("WebFetch", &json!({})), "used WebFetch");
    }

    #[test]
    fn missing_expected_field_falls_back_to_used_name() {
        assert_eq!(extract("Read", &json!({})), "used Read");
    }
}
