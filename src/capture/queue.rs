//! Bounded FIFO of capture artifacts. Pure bookkeeping; file removal is the store's job.

use super::QueueKind;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureArtifact {
    pub path: PathBuf,
    pub queue: QueueKind,
    /// Creation order across the whole store
    pub sequence: u64,
}

#[derive(Debug)]
pub struct CaptureQueue {
    kind: QueueKind,
    capacity: usize,
    entries: VecDeque<CaptureArtifact>,
}

impl CaptureQueue {
    pub fn new(kind: QueueKind, capacity: usize) -> Self {
        Self {
            kind,
            capacity: capacity.max(1),
            entries: VecDeque::with_capacity(capacity.max(1) + 1),
        }
    }

    pub fn kind(&self) -> QueueKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append and return whatever fell off the front to stay within capacity.
    pub fn push(&mut self, artifact: CaptureArtifact) -> Vec<CaptureArtifact> {
        self.entries.push_back(artifact);
        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            if let Some(oldest) = self.entries.pop_front() {
                evicted.push(oldest);
            }
        }
        evicted
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|a| a.path == path)
    }

    /// Remove an entry by path; false if it was not queued.
    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.entries.len();
        self.entries.retain(|a| a.path != path);
        self.entries.len() != before
    }

    /// Oldest to newest
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|a| a.path.clone()).collect()
    }

    pub fn artifacts(&self) -> Vec<CaptureArtifact> {
        self.entries.iter().cloned().collect()
    }

    pub fn drain(&mut self) -> Vec<CaptureArtifact> {
        self.entries.drain(..).collect()
    }
}
