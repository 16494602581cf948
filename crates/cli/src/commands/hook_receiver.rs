// SPDX-License-Identifier: MIT

//! Reads one hook event JSON object from stdin and appends it as a single
//! line to `{hooksDir}/{session_id}.jsonl`, registered with the AI coding
//! assistant's hook mechanism (spec §6).

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use ccvr_daemon::Paths;
use fs2::FileExt;
use serde_json::Value;

pub async fn run() -> Result<()> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input).context("reading hook event from stdin")?;

    let paths = Paths::resolve()?;
    append_hook_line(&paths.hooks_dir, input.trim())
}

/// Append one hook event line to its session's file under `hooks_dir`,
/// holding an advisory exclusive lock for the duration of the append.
fn append_hook_line(hooks_dir: &Path, raw: &str) -> Result<()> {
    let value: Value = serde_json::from_str(raw).context("parsing hook event JSON")?;
    let Some(session_id) = value.get("session_id").and_then(Value::as_str) else {
        bail!("hook event is missing a `session_id` field");
    };

    std::fs::create_dir_all(hooks_dir).context("creating hooks directory")?;
    let file_path = hooks_dir.join(format!("{session_id}.jsonl"));

    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&file_path)
        .with_context(|| format!("opening {}", file_path.display()))?;
    file.lock_exclusive().context("acquiring hook file lock")?;
    let line = serde_json::to_string(&value).context("re-serializing hook event")?;
    let result = writeln!(file, "{line}").context("appending hook event");
    FileExt::unlock(&file).ok();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn appends_a_line_to_the_sessions_file() {
        let dir = TempDir::new().expect("tempdir");
        append_hook_line(dir.path(), r#"{"session_id":"s1","hook_event_name":"idle_prompt"}"#).expect("append succeeds");

        let contents = std::fs::read_to_string(dir.path().join("s1.jsonl")).expect("read back");
        assert_eq!(contents.trim(), r#"{"session_id":"s1","hook_event_name":"idle_prompt"}"#);
    }

    #[test]
    fn second_append_goes_on_its_own_line() {
        let dir = TempDir::new().expect("tempdir");
        append_hook_line(dir.path(), r#"{"session_id":"s1","hook_event_name":"idle_prompt"}"#).expect("append 1");
        append_hook_line(dir.path(), r#"{"session_id":"s1","hook_event_name":"permission_prompt"}"#).expect("append 2");

        let contents = std::fs::read_to_string(dir.path().join("s1.jsonl")).expect("read back");
        assert_eq!(contents.lines().count(), 2);
    }

    #[test]
    fn missing_session_id_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let result = append_hook_line(dir.path(), r#"{"hook_event_name":"idle_prompt"}"#);
        assert!(result.is_err());
    }
}
