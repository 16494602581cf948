// SPDX-License-Identifier: MIT

use super::*;
use std::fs;
use std::io::Write;
use std::time::Duration;
use tempfile::TempDir;

async fn recv_lines(handle: &mut TailerHandle) -> (PathBuf, Vec<String>) {
    match tokio::time::timeout(Duration::from_secs(5), handle.recv())
        .await
        .expect("timed out waiting for a tail event")
        .expect("tailer channel closed unexpectedly")
    {
        TailEvent::Lines { path, lines } => (path, lines),
        TailEvent::Error { path, message } => panic!("unexpected tailer error {message} for {path:?}"),
    }
}

#[tokio::test]
async fn emits_lines_appended_after_start() {
    let dir = TempDir::new().expect("tempdir");
    let mut handle = start(dir.path().to_path_buf(), 1);

    let file_path = dir.path().join("session.jsonl");
    fs::write(&file_path, "{\"a\":1}\n").expect("write");

    let (path, lines) = recv_lines(&mut handle).await;
    assert_eq!(path, file_path);
    assert_eq!(lines, vec!["{\"a\":1}".to_string()]);

    handle.close().await;
}

#[tokio::test]
async fn does_not_emit_pre_existing_content_at_startup() {
    let dir = TempDir::new().expect("tempdir");
    let file_path = dir.path().join("session.jsonl");
    fs::write(&file_path, "{\"old\":true}\n").expect("write");

    let mut handle = start(dir.path().to_path_buf(), 1);

    let mut file = fs::OpenOptions::new().append(true).open(&file_path).expect("open");
    file.write_all(b"{\"new\":true}\n").expect("append");

    let (_path, lines) = recv_lines(&mut handle).await;
    assert_eq!(lines, vec!["{\"new\":true}".to_string()]);

    handle.close().await;
}

#[tokio::test]
async fn survives_missing_root_and_picks_it_up_once_created() {
    let parent = TempDir::new().expect("tempdir");
    let root = parent.path().join("projects");

    let mut handle = start(root.clone(), 4);

    fs::create_dir_all(&root).expect("create root late");
    let file_path = root.join("-p-app").join("s1.jsonl");
    fs::create_dir_all(file_path.parent().unwrap()).expect("mkdir");
    fs::write(&file_path, "{\"hello\":true}\n").expect("write");

    let (path, lines) = recv_lines(&mut handle).await;
    assert_eq!(path, file_path);
    assert_eq!(lines, vec!["{\"hello\":true}".to_string()]);

    handle.close().await;
}
