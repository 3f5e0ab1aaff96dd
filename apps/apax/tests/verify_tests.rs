//! Integration tests for the verify command's timed driver.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use apax::cli::{CommandContext, cmd_verify};

fn test_context(dir: &tempfile::TempDir) -> CommandContext {
    let state_path = dir.path().join("apax-ui.state");
    CommandContext::build(None, &state_path, true).unwrap()
}

#[tokio::test]
async fn verify_runs_to_completion() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(&dir);

    // 1ms cadence keeps the test fast; the driver must terminate on its own.
    cmd_verify(&ctx, Some(1), None, false).await.unwrap();
}

#[tokio::test]
async fn verify_halts_on_injected_failure() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(&dir);

    cmd_verify(&ctx, Some(1), Some("liveness"), false)
        .await
        .unwrap();
}

#[tokio::test]
async fn verify_resumes_after_injected_failure() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(&dir);

    // Fail at liveness, then reset and let the fresh generation complete.
    cmd_verify(&ctx, Some(1), Some("liveness"), true)
        .await
        .unwrap();
}

#[tokio::test]
async fn verify_rejects_terminal_failure_stage() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = test_context(&dir);

    assert!(cmd_verify(&ctx, Some(1), Some("completed"), false).await.is_err());
    assert!(cmd_verify(&ctx, Some(1), Some("idle"), false).await.is_err());
    assert!(cmd_verify(&ctx, Some(1), Some("bogus"), false).await.is_err());
}
