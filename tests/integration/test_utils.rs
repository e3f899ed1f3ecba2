//! Shared test utilities for integration tests
//!
//! Builds isolated API instances over temp directories, and serializes environment
//! variable mutation for config tests.

use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wingman::capture::{CaptureStore, CaptureStrategy};
use wingman::gateway::AiGateway;
use wingman::session::Session;
use wingman::testing::{FakeCapture, RecordingVisibility, ScriptedClient};
use wingman::WingmanApi;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// One API instance with every collaborator observable
pub struct Harness {
    pub api: WingmanApi,
    pub client: Arc<ScriptedClient>,
    pub visibility: Arc<RecordingVisibility>,
    pub _dir: TempDir,
}

impl Harness {
    pub fn new(replies: Vec<Result<String, wingman::WingmanError>>) -> Self {
        Self::with_strategy(replies, Arc::new(FakeCapture::new()))
    }

    pub fn with_strategy(
        replies: Vec<Result<String, wingman::WingmanError>>,
        strategy: Arc<dyn CaptureStrategy>,
    ) -> Self {
        let dir = TempDir::new().unwrap();
        let client = Arc::new(ScriptedClient::new(replies));
        let visibility = Arc::new(RecordingVisibility::default());
        let api = WingmanApi::new(
            Arc::new(CaptureStore::new(dir.path(), 5)),
            strategy,
            visibility.clone(),
            AiGateway::new(client.clone()),
            Arc::new(Session::new("You are a test persona.")),
        );
        Self {
            api,
            client,
            visibility,
            _dir: dir,
        }
    }

    pub fn root(&self) -> &Path {
        self._dir.path()
    }
}

/// Set environment variables for the duration of `f`, restoring them afterwards
pub fn with_env<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();

    for (key, value) in vars {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }

    let result = f();

    for (key, original) in saved {
        match original {
            Some(v) => std::env::set_var(&key, v),
            None => std::env::remove_var(&key),
        }
    }
    result
}
