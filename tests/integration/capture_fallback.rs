//! Preferred capture with generic fallback, and window visibility around it

use super::test_utils::Harness;
use std::sync::Arc;
use wingman::capture::{CaptureStrategy, FallbackCapture, View};
use wingman::testing::FakeBackend;
use wingman::WingmanError;

#[tokio::test]
async fn test_fallback_used_after_preferred_failure() {
    let preferred = FakeBackend::failing("native");
    let fallback = FakeBackend::ok("generic");
    let strategy = FallbackCapture::new(
        Some(Box::new(preferred.clone())),
        Box::new(fallback.clone()),
    );

    let temp = tempfile::tempdir().unwrap();
    let destination = temp.path().join("shot.png");
    strategy.acquire(&destination).await.unwrap();

    assert_eq!(preferred.attempts(), 1);
    assert_eq!(fallback.attempts(), 1);
    assert!(destination.exists());
}

#[tokio::test]
async fn test_preferred_success_skips_fallback() {
    let preferred = FakeBackend::ok("native");
    let fallback = FakeBackend::ok("generic");
    let strategy = FallbackCapture::new(
        Some(Box::new(preferred.clone())),
        Box::new(fallback.clone()),
    );

    let temp = tempfile::tempdir().unwrap();
    strategy.acquire(&temp.path().join("shot.png")).await.unwrap();
    assert_eq!(fallback.attempts(), 0);
}

#[tokio::test]
async fn test_both_failing_surfaces_capture_error_and_restores_window() {
    let preferred = FakeBackend::failing("native");
    let fallback = FakeBackend::failing("generic");
    let strategy = Arc::new(FallbackCapture::new(
        Some(Box::new(preferred.clone())),
        Box::new(fallback.clone()),
    ));
    let harness = Harness::with_strategy(Vec::new(), strategy);

    let err = harness.api.capture_screen().await.unwrap_err();
    match err {
        WingmanError::Capture(message) => {
            assert!(message.contains("native"));
            assert!(message.contains("generic"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(harness.visibility.hidden(), 1);
    assert_eq!(harness.visibility.shown(), 1);
    assert_eq!(fallback.attempts(), 1);
    assert!(harness.api.store().list(View::Queue).await.is_empty());
}

#[tokio::test]
async fn test_window_shown_once_per_successful_capture() {
    let harness = Harness::new(Vec::new());
    harness.api.capture_screen().await.unwrap();
    harness.api.capture_screen().await.unwrap();
    assert_eq!(harness.visibility.hidden(), 2);
    assert_eq!(harness.visibility.shown(), 2);
}
