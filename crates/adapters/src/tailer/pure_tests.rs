// SPDX-License-Identifier: MIT

use super::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn append(path: &Path, contents: &str) {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(path)
        .expect("open for append");
    file.write_all(contents.as_bytes()).expect("append");
}

#[test]
fn reads_complete_lines_and_advances_offset() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(&dir, "s.jsonl", "{\"a\":1}\n{\"b\":2}\n");

    let step = read_increment(&path, 0).expect("read");
    assert_eq!(step.lines, vec!["{\"a\":1}", "{\"b\":2}"]);
    assert_eq!(step.new_offset, 16);
    assert!(!step.truncated);
}

#[test]
fn defers_trailing_partial_line() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(&dir, "s.jsonl", "{\"a\":1}\n{\"b\":2");

    let step = read_increment(&path, 0).expect("read");
    assert_eq!(step.lines, vec!["{\"a\":1}"]);
    assert_eq!(step.new_offset, 8);

    append(&path, "}\n");
    let step2 = read_increment(&path, step.new_offset).expect("read again");
    assert_eq!(step2.lines, vec!["{\"b\":2}"]);
}

#[test]
fn no_growth_yields_no_lines_and_same_offset() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(&dir, "s.jsonl", "{\"a\":1}\n");

    let step = read_increment(&path, 8).expect("read");
    assert!(step.lines.is_empty());
    assert_eq!(step.new_offset, 8);
    assert!(!step.truncated);
}

#[test]
fn truncation_resets_offset_and_emits_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(&dir, "s.jsonl", "{\"a\":1}\n{\"b\":2}\n");

    fs::write(&path, "{\"c\":3}\n").expect("truncate+rewrite");

    let step = read_increment(&path, 16).expect("read after truncation");
    assert!(step.lines.is_empty());
    assert!(step.truncated);
    assert_eq!(step.new_offset, 8);

    let step2 = read_increment(&path, step.new_offset).expect("read post-truncation content");
    assert_eq!(step2.lines, vec!["{\"c\":3}"]);
}

#[test]
fn empty_line_advances_offset_without_emitting() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_file(&dir, "s.jsonl", "\n{\"a\":1}\n");

    let step = read_increment(&path, 0).expect("read");
    assert_eq!(step.lines, vec!["{\"a\":1}"]);
    assert_eq!(step.new_offset, 9);
}

#[test]
fn multibyte_utf8_split_across_reads_is_deferred_whole() {
    let dir = TempDir::new().expect("tempdir");
    // "caf\u{e9}" - the trailing character is multi-byte in UTF-8.
    let first_half = "{\"text\":\"caf".as_bytes();
    let path = dir.path().join("s.jsonl");
    fs::write(&path, first_half).expect("write partial");

    let step = read_increment(&path, 0).expect("read partial multibyte prefix");
    assert!(step.lines.is_empty());
    assert_eq!(step.new_offset, 0);

    append(&path, "\u{e9}\"}\n");
    let step2 = read_increment(&path, step.new_offset).expect("read complete line");
    assert_eq!(step2.lines, vec!["{\"text\":\"caf\u{e9}\"}"]);
}

#[test]
fn find_jsonl_files_respects_max_depth() {
    let dir = TempDir::new().expect("tempdir");
    write_file(&dir, "top.jsonl", "{}\n");
    fs::create_dir_all(dir.path().join("proj/session")).expect("mkdir");
    fs::write(dir.path().join("proj/one.jsonl"), "{}\n").expect("write");
    fs::write(dir.path().join("proj/session/two.jsonl"), "{}\n").expect("write");

    let depth1 = find_jsonl_files(dir.path(), 1);
    assert_eq!(depth1.len(), 2);

    let depth2 = find_jsonl_files(dir.path(), 2);
    assert_eq!(depth2.len(), 3);
}

#[test]
fn find_jsonl_files_on_missing_root_is_empty_not_error() {
    let missing = PathBuf::from("/no/such/directory/ever");
    assert!(find_jsonl_files(&missing, 4).is_empty());
}

#[test]
fn is_subagent_checks_exact_path_segment() {
    assert!(is_subagent(Path::new("/p/sess/subagents/a.jsonl")));
    assert!(!is_subagent(Path::new("/p/sess/subagents_old/a.jsonl")));
    assert!(!is_subagent(Path::new("/p/sess/a.jsonl")));
}

#[test]
fn extract_project_dir_takes_first_segment_under_root() {
    let root = Path::new("/home/u/.claude/projects");
    let path = root.join("-home-u-code-myapp/sess-id.jsonl");
    assert_eq!(
        extract_project_dir(&path, root),
        Some("-home-u-code-myapp".to_string())
    );
}

#[test]
fn extract_session_id_for_main_session_is_file_stem() {
    let root = Path::new("/home/u/.claude/projects");
    let path = root.join("-home-u-code-myapp/abc-123.jsonl");
    assert_eq!(extract_session_id(&path, root), Some("abc-123".to_string()));
}

#[test]
fn extract_session_id_for_subagent_is_segment_before_subagents() {
    let root = Path::new("/home/u/.claude/projects");
    let path = root.join("-home-u-code-myapp/abc-123/subagents/agent-7.jsonl");
    assert_eq!(extract_session_id(&path, root), Some("abc-123".to_string()));
}
