//! Capture Store
//!
//! Owns the primary and supplementary queues and their directories. Each queue sits
//! behind its own async mutex, so append+evict (file removal included) is atomic
//! from a caller's point of view. When both locks are needed they are always taken
//! primary first.

use super::queue::{CaptureArtifact, CaptureQueue};
use super::strategy::CaptureStrategy;
use super::{CaptureConfig, QueueKind, View};
use crate::error::WingmanError;
use crate::provider::media::{mime_for_path, DEFAULT_IMAGE_MIME};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub struct CaptureStore {
    root: PathBuf,
    primary: Mutex<CaptureQueue>,
    supplementary: Mutex<CaptureQueue>,
    sequence: AtomicU64,
}

impl CaptureStore {
    /// Directories under `root` are created lazily on first capture.
    pub fn new(root: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            root: root.into(),
            primary: Mutex::new(CaptureQueue::new(QueueKind::Primary, capacity)),
            supplementary: Mutex::new(CaptureQueue::new(QueueKind::Supplementary, capacity)),
            sequence: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &CaptureConfig) -> Self {
        Self::new(config.resolve_data_dir(), config.capacity)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn queue_dir(&self, kind: QueueKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    fn queue(&self, kind: QueueKind) -> &Mutex<CaptureQueue> {
        match kind {
            QueueKind::Primary => &self.primary,
            QueueKind::Supplementary => &self.supplementary,
        }
    }

    /// Acquire a new screenshot into the queue selected by `view`.
    ///
    /// On overflow the oldest artifact of that queue is evicted and its file removed;
    /// removal failures are logged and do not fail the capture.
    pub async fn capture(
        &self,
        view: View,
        strategy: &dyn CaptureStrategy,
    ) -> Result<PathBuf, WingmanError> {
        let kind = view.queue_kind();
        let dir = self.queue_dir(kind);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| WingmanError::io(&dir, e))?;

        let path = dir.join(format!("{}.png", uuid::Uuid::new_v4()));
        if let Err(e) = strategy.acquire(&path).await {
            // Never leave a half-written file behind.
            let _ = tokio::fs::remove_file(&path).await;
            return Err(e);
        }

        let artifact = CaptureArtifact {
            path: path.clone(),
            queue: kind,
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
        };

        let mut queue = self.queue(kind).lock().await;
        let evicted = queue.push(artifact);
        for old in evicted {
            match tokio::fs::remove_file(&old.path).await {
                Ok(()) => debug!(path = %old.path.display(), "Evicted oldest capture"),
                Err(e) => warn!(
                    path = %old.path.display(),
                    error = %e,
                    "Failed to delete evicted capture"
                ),
            }
        }
        info!(path = %path.display(), view = %view, queued = queue.len(), "Capture stored");
        Ok(path)
    }

    /// Current membership of a view's queue, oldest to newest.
    pub async fn list(&self, view: View) -> Vec<PathBuf> {
        self.queue(view.queue_kind()).lock().await.paths()
    }

    /// Point-in-time copy used at the start of a pipeline flow.
    pub async fn snapshot(&self, view: View) -> Vec<PathBuf> {
        self.list(view).await
    }

    pub async fn artifacts(&self, view: View) -> Vec<CaptureArtifact> {
        self.queue(view.queue_kind()).lock().await.artifacts()
    }

    /// Base64 payload of an image file.
    pub async fn preview(&self, path: &Path) -> Result<String, WingmanError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| WingmanError::io(path, e))?;
        Ok(BASE64.encode(bytes))
    }

    pub async fn preview_data_uri(&self, path: &Path) -> Result<String, WingmanError> {
        let payload = self.preview(path).await?;
        Ok(format!(
            "data:{};base64,{}",
            mime_for_path(path, DEFAULT_IMAGE_MIME),
            payload
        ))
    }

    /// Delete a capture and drop it from whichever queue holds it.
    ///
    /// Paths in neither queue and outside both capture directories are left on disk
    /// and reported as success. A file that is already gone counts as deleted.
    pub async fn delete(&self, path: &Path) -> Result<(), WingmanError> {
        let mut primary = self.primary.lock().await;
        let mut supplementary = self.supplementary.lock().await;

        let queued = primary.contains(path) || supplementary.contains(path);
        if !queued && !self.is_managed_path(path) {
            debug!(path = %path.display(), "Delete ignored for unmanaged path");
            return Ok(());
        }

        match tokio::fs::remove_file(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Capture already absent on disk");
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to delete capture");
                return Err(WingmanError::io(path, e));
            }
        }

        primary.remove(path);
        supplementary.remove(path);
        Ok(())
    }

    /// Delete every artifact in both queues (best effort) and empty them.
    pub async fn reset_all(&self) {
        let mut primary = self.primary.lock().await;
        let mut supplementary = self.supplementary.lock().await;

        let drained: Vec<CaptureArtifact> = primary
            .drain()
            .into_iter()
            .chain(supplementary.drain())
            .collect();
        let count = drained.len();
        for artifact in drained {
            if let Err(e) = tokio::fs::remove_file(&artifact.path).await {
                warn!(
                    path = %artifact.path.display(),
                    error = %e,
                    "Failed to delete capture during reset"
                );
            }
        }
        info!(removed = count, "Capture queues reset");
    }

    fn is_managed_path(&self, path: &Path) -> bool {
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return false;
        }
        [QueueKind::Primary, QueueKind::Supplementary]
            .iter()
            .any(|kind| path.parent() == Some(self.queue_dir(*kind).as_path()))
    }
}
