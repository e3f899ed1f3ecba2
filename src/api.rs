//! Wingman API
//!
//! The operations a UI host calls, as typed async methods returning serializable
//! results. Capture, analysis and media-description failures are returned as errors;
//! delete, reset and follow-up always resolve with a status.

use crate::capture::{
    CaptureStore, CaptureStrategy, FallbackCapture, View, VisibilityGuard, WindowVisibility,
};
use crate::config::WingmanConfig;
use crate::error::WingmanError;
use crate::gateway::AiGateway;
use crate::pipeline::{AudioSource, Pipeline};
use crate::prompt::{PriorContext, PriorProblem};
use crate::provider::{ModelProviderClient, ProviderFactory};
use crate::session::{Phase, Session};
use crate::types::{FollowUpAnswer, MediaDescription, ProblemContext, SolutionContext};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// A queued screenshot with its inline preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureEntry {
    pub path: PathBuf,
    pub preview_data_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetOutcome {
    pub success: bool,
}

pub struct WingmanApi {
    store: Arc<CaptureStore>,
    strategy: Arc<dyn CaptureStrategy>,
    visibility: Arc<dyn WindowVisibility>,
    session: Arc<Session>,
    pipeline: Pipeline,
    /// Serializes hide → capture → show
    capture_lock: Mutex<()>,
}

impl WingmanApi {
    pub fn new(
        store: Arc<CaptureStore>,
        strategy: Arc<dyn CaptureStrategy>,
        visibility: Arc<dyn WindowVisibility>,
        gateway: AiGateway,
        session: Arc<Session>,
    ) -> Self {
        let pipeline = Pipeline::new(gateway, Arc::clone(&session));
        Self {
            store,
            strategy,
            visibility,
            session,
            pipeline,
            capture_lock: Mutex::new(()),
        }
    }

    /// Wire everything from configuration, using the platform capture strategy.
    pub fn from_config(
        config: &WingmanConfig,
        visibility: Arc<dyn WindowVisibility>,
    ) -> Result<Self, WingmanError> {
        let client: Arc<dyn ModelProviderClient> =
            Arc::from(ProviderFactory::from_config(&config.provider)?);
        let gateway =
            AiGateway::new(client).with_options(config.provider.default_options.clone());
        let store = Arc::new(CaptureStore::from_config(&config.capture));
        let strategy = Arc::new(FallbackCapture::for_current_platform(&config.capture));
        let session = Arc::new(Session::from_config(&config.prompt));
        info!(
            provider = gateway.provider_name(),
            model = gateway.model_name(),
            data_dir = %store.root().display(),
            "Wingman API ready"
        );
        Ok(Self::new(store, strategy, visibility, gateway, session))
    }

    pub fn store(&self) -> &CaptureStore {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Take a screenshot into the active view's queue with the window hidden.
    pub async fn capture_screen(&self) -> Result<CaptureEntry, WingmanError> {
        let _serial = self.capture_lock.lock().await;
        let view = self.session.view();
        let captured = {
            let _hidden = VisibilityGuard::hide(self.visibility.as_ref());
            self.store.capture(view, self.strategy.as_ref()).await
        };
        let path = captured.map_err(|e| {
            error!(%view, error = %e, "Screenshot capture failed");
            e
        })?;
        let preview_data_uri = self.store.preview_data_uri(&path).await?;
        Ok(CaptureEntry {
            path,
            preview_data_uri,
        })
    }

    /// The active view's queue, oldest first, with previews.
    pub async fn list_captures(&self) -> Result<Vec<CaptureEntry>, WingmanError> {
        let paths = self.store.list(self.session.view()).await;
        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            let preview_data_uri = self.store.preview_data_uri(&path).await?;
            entries.push(CaptureEntry {
                path,
                preview_data_uri,
            });
        }
        Ok(entries)
    }

    pub async fn delete_capture(&self, path: &Path) -> DeleteOutcome {
        match self.store.delete(path).await {
            Ok(()) => DeleteOutcome {
                success: true,
                error: None,
            },
            Err(e) => DeleteOutcome {
                success: false,
                error: Some(e.to_string()),
            },
        }
    }

    pub async fn reset_captures(&self) -> ResetOutcome {
        self.store.reset_all().await;
        ResetOutcome { success: true }
    }

    pub fn set_view(&self, view: View) {
        self.session.set_view(view);
    }

    pub fn get_view(&self) -> View {
        self.session.view()
    }

    /// Blank text clears the override.
    pub fn set_operator_override(&self, text: &str) {
        self.session.set_operator_override(text);
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub async fn extract_problem(
        &self,
        images: &[PathBuf],
    ) -> Result<ProblemContext, WingmanError> {
        self.pipeline.extract(images).await
    }

    /// Extract from every screenshot currently in the primary queue.
    pub async fn extract_problem_from_queue(&self) -> Result<ProblemContext, WingmanError> {
        let images = self.store.snapshot(View::Queue).await;
        self.pipeline.extract(&images).await
    }

    pub async fn generate_solution(
        &self,
        problem: &ProblemContext,
    ) -> Result<SolutionContext, WingmanError> {
        self.pipeline.solve(problem).await
    }

    pub async fn debug_solution(
        &self,
        problem: &ProblemContext,
        current_answer: &str,
        images: &[PathBuf],
    ) -> Result<SolutionContext, WingmanError> {
        self.pipeline.debug(problem, current_answer, images).await
    }

    /// Debug against every screenshot currently in the supplementary queue.
    pub async fn debug_solution_from_queue(
        &self,
        problem: &ProblemContext,
        current_answer: &str,
    ) -> Result<SolutionContext, WingmanError> {
        let images = self.store.snapshot(View::Solutions).await;
        self.pipeline.debug(problem, current_answer, &images).await
    }

    pub async fn describe_audio(
        &self,
        source: AudioSource,
    ) -> Result<MediaDescription, WingmanError> {
        self.pipeline.describe_audio(source).await
    }

    pub async fn describe_image(&self, path: &Path) -> Result<MediaDescription, WingmanError> {
        self.pipeline.describe_image(path).await
    }

    pub async fn ask_follow_up(
        &self,
        question: &str,
        problem: Option<&PriorProblem>,
        prior: Option<&PriorContext>,
    ) -> Option<FollowUpAnswer> {
        self.pipeline.ask(question, problem, prior).await
    }

    /// Follow-up with untyped UI payloads; `null` means absent.
    pub async fn ask_follow_up_json(
        &self,
        question: &str,
        problem: Value,
        prior: Value,
    ) -> Option<FollowUpAnswer> {
        let problem = PriorProblem::from_value(problem);
        let prior = PriorContext::from_value(prior);
        self.pipeline
            .ask(question, problem.as_ref(), prior.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeCapture, RecordingVisibility, ScriptedClient};
    use tempfile::TempDir;

    fn api(
        temp: &TempDir,
        strategy: FakeCapture,
        visibility: Arc<RecordingVisibility>,
    ) -> WingmanApi {
        WingmanApi::new(
            Arc::new(CaptureStore::new(temp.path(), 5)),
            Arc::new(strategy),
            visibility,
            AiGateway::new(Arc::new(ScriptedClient::new(Vec::new()))),
            Arc::new(Session::default()),
        )
    }

    #[tokio::test]
    async fn test_capture_screen_returns_preview() {
        let temp = TempDir::new().unwrap();
        let visibility = Arc::new(RecordingVisibility::default());
        let api = api(&temp, FakeCapture::new(), visibility.clone());

        let entry = api.capture_screen().await.unwrap();
        assert!(entry.preview_data_uri.starts_with("data:image/png;base64,"));
        assert_eq!(visibility.hidden(), 1);
        assert_eq!(visibility.shown(), 1);

        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("previewDataUri").is_some());
    }

    #[tokio::test]
    async fn test_failed_capture_still_shows_window() {
        let temp = TempDir::new().unwrap();
        let visibility = Arc::new(RecordingVisibility::default());
        let api = api(&temp, FakeCapture::failing(), visibility.clone());

        let err = api.capture_screen().await.unwrap_err();
        assert!(matches!(err, WingmanError::Capture(_)));
        assert_eq!(visibility.shown(), 1);
        assert!(api.list_captures().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_path_reports_success() {
        let temp = TempDir::new().unwrap();
        let api = api(
            &temp,
            FakeCapture::new(),
            Arc::new(RecordingVisibility::default()),
        );
        let outcome = api.delete_capture(Path::new("/nowhere/none.png")).await;
        assert_eq!(
            outcome,
            DeleteOutcome {
                success: true,
                error: None
            }
        );
        assert!(api.reset_captures().await.success);
    }
}
