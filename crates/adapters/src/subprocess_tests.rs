// SPDX-License-Identifier: MIT

use super::*;

#[tokio::test]
async fn succeeds_under_timeout() {
    let mut cmd = Command::new("true");
    cmd.kill_on_drop(true);
    let output = run_with_timeout(cmd, Duration::from_secs(5), "true").await;
    assert!(output.is_ok());
}

#[tokio::test]
async fn reports_timeout_as_error() {
    let mut cmd = Command::new("sleep");
    cmd.arg("5");
    let result = run_with_timeout(cmd, Duration::from_millis(50), "sleep").await;
    let err = result.expect_err("should time out");
    assert!(err.contains("timed out"));
}

#[tokio::test]
async fn reports_spawn_failure() {
    let cmd = Command::new("/no/such/executable/anywhere");
    let result = run_with_timeout(cmd, Duration::from_secs(5), "missing binary").await;
    let err = result.expect_err("should fail to spawn");
    assert!(err.contains("missing binary"));
}
