//! Test doubles for the injected capabilities: model client, capture, window visibility.

use crate::capture::{CaptureBackend, CaptureStrategy, WindowVisibility};
use crate::error::{RemoteErrorKind, WingmanError};
use crate::provider::{GenerationRequest, GenerationResponse, ModelProviderClient};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// First bytes of a PNG file
pub const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Model client that replays scripted replies in order and records every request.
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, WingmanError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<String, WingmanError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    pub fn push_reply(&self, reply: Result<String, WingmanError>) {
        self.replies.lock().push_back(reply);
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.requests.lock().last().map(|r| r.prompt.clone())
    }
}

#[async_trait]
impl ModelProviderClient for ScriptedClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, WingmanError> {
        self.requests.lock().push(request);
        let reply = self.replies.lock().pop_front().unwrap_or_else(|| {
            Err(WingmanError::remote(
                "scripted",
                RemoteErrorKind::Protocol,
                "no scripted reply left",
            ))
        })?;
        Ok(GenerationResponse {
            text: reply,
            model: "scripted-model".to_string(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Backend that writes a PNG stub or fails, counting attempts.
#[derive(Clone)]
pub struct FakeBackend {
    name: String,
    succeed: bool,
    attempts: Arc<AtomicUsize>,
}

impl FakeBackend {
    pub fn ok(name: &str) -> Self {
        Self {
            name: name.to_string(),
            succeed: true,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            succeed: false,
            ..Self::ok(name)
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptureBackend for FakeBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn capture_to(&self, destination: &Path) -> io::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.succeed {
            tokio::fs::write(destination, PNG_SIGNATURE).await
        } else {
            Err(io::Error::new(io::ErrorKind::Other, "simulated capture failure"))
        }
    }
}

/// Strategy that writes a PNG stub directly, or always fails with a capture error.
#[derive(Clone, Default)]
pub struct FakeCapture {
    fail: bool,
    attempts: Arc<AtomicUsize>,
}

impl FakeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptureStrategy for FakeCapture {
    async fn acquire(&self, destination: &Path) -> Result<(), WingmanError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(WingmanError::Capture("simulated capture failure".to_string()));
        }
        tokio::fs::write(destination, PNG_SIGNATURE)
            .await
            .map_err(|e| WingmanError::io(destination, e))
    }
}

/// Counts hide and show calls.
#[derive(Debug, Default)]
pub struct RecordingVisibility {
    hidden: AtomicUsize,
    shown: AtomicUsize,
}

impl RecordingVisibility {
    pub fn hidden(&self) -> usize {
        self.hidden.load(Ordering::SeqCst)
    }

    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

impl WindowVisibility for RecordingVisibility {
    fn hide(&self) {
        self.hidden.fetch_add(1, Ordering::SeqCst);
    }

    fn show(&self) {
        self.shown.fetch_add(1, Ordering::SeqCst);
    }
}
