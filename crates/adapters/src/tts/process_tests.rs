// SPDX-License-Identifier: MIT

use super::*;

#[tokio::test]
async fn speaks_via_successful_binary() {
    let adapter = ProcessTtsAdapter::new(vec!["true".to_string()], Duration::from_secs(5));
    adapter.speak("hello").await.expect("should succeed");
}

#[tokio::test]
async fn non_zero_exit_is_reported() {
    let adapter = ProcessTtsAdapter::new(vec!["false".to_string()], Duration::from_secs(5));
    let err = adapter.speak("hello").await.expect_err("should fail");
    assert!(matches!(err, TtsError::NonZeroExit(_)));
}

#[tokio::test]
async fn missing_binary_is_spawn_failure() {
    let adapter = ProcessTtsAdapter::new(
        vec!["/no/such/tts/binary".to_string()],
        Duration::from_secs(5),
    );
    let err = adapter.speak("hello").await.expect_err("should fail");
    assert!(matches!(err, TtsError::SpawnFailed(_)));
}

#[tokio::test]
async fn empty_argv_is_spawn_failure() {
    let adapter = ProcessTtsAdapter::new(vec![], Duration::from_secs(5));
    let err = adapter.speak("hello").await.expect_err("should fail");
    assert!(matches!(err, TtsError::SpawnFailed(_)));
}
