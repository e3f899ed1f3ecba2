//! Capture queue bounds, view isolation and deletion through the API

use super::test_utils::Harness;
use std::sync::Arc;
use wingman::capture::{CaptureStore, View};
use wingman::testing::FakeCapture;

#[tokio::test]
async fn test_sixth_capture_evicts_the_first() {
    let harness = Harness::new(Vec::new());
    let mut captured = Vec::new();
    for _ in 0..6 {
        captured.push(harness.api.capture_screen().await.unwrap().path);
    }

    let listed: Vec<_> = harness
        .api
        .list_captures()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.path)
        .collect();
    assert_eq!(listed, captured[1..].to_vec());
    assert!(!captured[0].exists());
    assert!(captured[1..].iter().all(|p| p.exists()));
}

#[tokio::test]
async fn test_views_are_isolated() {
    let harness = Harness::new(Vec::new());
    let primary = harness.api.capture_screen().await.unwrap().path;

    harness.api.set_view(View::Solutions);
    assert_eq!(harness.api.get_view(), View::Solutions);
    assert!(harness.api.list_captures().await.unwrap().is_empty());

    let supplementary = harness.api.capture_screen().await.unwrap().path;
    assert!(supplementary.starts_with(harness.root().join("extra_screenshots")));

    harness.api.set_view(View::Queue);
    let listed: Vec<_> = harness
        .api
        .list_captures()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.path)
        .collect();
    assert_eq!(listed, vec![primary]);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let harness = Harness::new(Vec::new());
    let kept = harness.api.capture_screen().await.unwrap().path;
    let doomed = harness.api.capture_screen().await.unwrap().path;

    assert!(harness.api.delete_capture(&doomed).await.success);
    assert!(!doomed.exists());
    let again = harness.api.delete_capture(&doomed).await;
    assert!(again.success);
    assert!(again.error.is_none());

    let listed: Vec<_> = harness
        .api
        .list_captures()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.path)
        .collect();
    assert_eq!(listed, vec![kept]);
}

#[tokio::test]
async fn test_delete_reaches_inactive_view() {
    let harness = Harness::new(Vec::new());
    harness.api.set_view(View::Solutions);
    let path = harness.api.capture_screen().await.unwrap().path;

    harness.api.set_view(View::Queue);
    assert!(harness.api.delete_capture(&path).await.success);

    assert!(harness.api.store().list(View::Solutions).await.is_empty());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_reset_clears_both_views() {
    let harness = Harness::new(Vec::new());
    let a = harness.api.capture_screen().await.unwrap().path;
    harness.api.set_view(View::Solutions);
    let b = harness.api.capture_screen().await.unwrap().path;

    assert!(harness.api.reset_captures().await.success);
    assert!(harness.api.store().list(View::Queue).await.is_empty());
    assert!(harness.api.store().list(View::Solutions).await.is_empty());
    assert!(!a.exists() && !b.exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_captures_stay_bounded() {
    let temp = tempfile::tempdir().unwrap();
    let store = Arc::new(CaptureStore::new(temp.path(), 5));
    let strategy = Arc::new(FakeCapture::new());

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let store = store.clone();
            let strategy = strategy.clone();
            tokio::spawn(async move { store.capture(View::Queue, strategy.as_ref()).await })
        })
        .collect();
    let mut captured = Vec::new();
    for handle in handles {
        captured.push(handle.await.unwrap().unwrap());
    }

    let queued = store.list(View::Queue).await;
    assert_eq!(queued.len(), 5);
    let on_disk = std::fs::read_dir(temp.path().join("screenshots"))
        .unwrap()
        .count();
    assert_eq!(on_disk, 5);
    assert!(queued.iter().all(|p| p.exists()));
    let evicted: Vec<_> = captured.iter().filter(|p| !queued.contains(p)).collect();
    assert_eq!(evicted.len(), 15);
    assert!(evicted.iter().all(|p| !p.exists()));
}
