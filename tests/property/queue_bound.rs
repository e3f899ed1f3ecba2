//! Queue length never exceeds capacity, and eviction keeps the newest entries

use proptest::prelude::*;
use std::path::PathBuf;
use wingman::capture::{CaptureArtifact, CaptureQueue, CaptureStore, View};
use wingman::testing::FakeCapture;

fn artifact(n: u64) -> CaptureArtifact {
    CaptureArtifact {
        path: PathBuf::from(format!("/captures/{}.png", n)),
        queue: View::Queue.queue_kind(),
        sequence: n,
    }
}

proptest! {
    #[test]
    fn queue_keeps_most_recent(capacity in 1usize..8, pushes in 0u64..30) {
        let mut queue = CaptureQueue::new(View::Queue.queue_kind(), capacity);
        let mut evicted = Vec::new();
        for n in 0..pushes {
            evicted.extend(queue.push(artifact(n)));
            prop_assert!(queue.len() <= capacity);
        }

        let kept = (pushes as usize).min(capacity) as u64;
        let expected: Vec<PathBuf> = (pushes - kept..pushes).map(|n| artifact(n).path).collect();
        prop_assert_eq!(queue.paths(), expected);

        let expected_evicted: Vec<u64> = (0..pushes - kept).collect();
        let actual_evicted: Vec<u64> = evicted.iter().map(|a| a.sequence).collect();
        prop_assert_eq!(actual_evicted, expected_evicted);
    }
}

/// N > capacity captures leave exactly the newest `capacity` files on disk.
#[test]
fn test_store_deletes_evicted_files() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut runner = proptest::test_runner::TestRunner::new(ProptestConfig::with_cases(16));

    runner
        .run(&(6usize..12), |captures| {
            runtime.block_on(async {
                let temp = tempfile::tempdir().unwrap();
                let store = CaptureStore::new(temp.path(), 5);
                let strategy = FakeCapture::new();
                let mut all = Vec::new();
                for _ in 0..captures {
                    all.push(store.capture(View::Queue, &strategy).await.unwrap());
                }

                let listed = store.list(View::Queue).await;
                assert_eq!(listed, all[captures - 5..].to_vec());
                let on_disk = std::fs::read_dir(temp.path().join("screenshots"))
                    .unwrap()
                    .count();
                assert_eq!(on_disk, 5);
                assert!(all[..captures - 5].iter().all(|p| !p.exists()));
            });
            Ok(())
        })
        .unwrap();
}
