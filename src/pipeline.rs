//! Pipeline Orchestrator
//!
//! Sequences prompt construction and gateway calls into the extract, solve, debug
//! and follow-up flows, plus the describe flows for single media items. Image lists
//! are passed in by the caller; the façade snapshots them from the capture queues.

use crate::error::WingmanError;
use crate::gateway::AiGateway;
use crate::prompt::{build_prompt, PriorContext, PriorProblem, PromptKind, PromptRequest};
use crate::provider::media::{DEFAULT_AUDIO_MIME, DEFAULT_IMAGE_MIME};
use crate::provider::MediaPart;
use crate::session::{Phase, Session};
use crate::types::{FollowUpAnswer, MediaDescription, ProblemContext, SolutionContext};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Audio to describe: a file on disk or an already-encoded clip from the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum AudioSource {
    File {
        path: PathBuf,
    },
    Inline {
        data: String,
        #[serde(rename = "mimeType", alias = "mime_type")]
        mime_type: String,
    },
}

pub struct Pipeline {
    gateway: AiGateway,
    session: Arc<Session>,
}

impl Pipeline {
    pub fn new(gateway: AiGateway, session: Arc<Session>) -> Self {
        Self { gateway, session }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn prompt(&self, request: PromptRequest<'_>) -> String {
        let override_text = self.session.operator_override();
        build_prompt(&request, self.session.persona(), override_text.as_deref())
    }

    /// Run `flow` in `active`; settle in `settled` on success, or fall back to the
    /// phase the flow started from.
    async fn in_phase<T, F>(&self, active: Phase, settled: Phase, flow: F) -> Result<T, WingmanError>
    where
        F: Future<Output = Result<T, WingmanError>>,
    {
        let started = self.session.enter(active);
        let result = flow.await;
        self.session
            .enter(if result.is_ok() { settled } else { started });
        result
    }

    /// Extract a Problem Context from screenshots.
    pub async fn extract(&self, images: &[PathBuf]) -> Result<ProblemContext, WingmanError> {
        self.in_phase(Phase::Extracting, Phase::ReadyToSolve, async {
            let media = load_images(images).await?;
            let prompt = self.prompt(PromptRequest::Extract);
            let problem: ProblemContext = self
                .gateway
                .generate_parsed(PromptKind::Extract.as_str(), prompt, media)
                .await?;
            info!(images = images.len(), "Problem extracted");
            Ok(problem)
        })
        .await
    }

    /// Text-only solve of a previously extracted problem.
    pub async fn solve(&self, problem: &ProblemContext) -> Result<SolutionContext, WingmanError> {
        self.in_phase(Phase::Solving, Phase::ReadyToSolve, async {
            let prompt = self.prompt(PromptRequest::Solve { problem });
            self.gateway
                .generate_parsed(PromptKind::Solve.as_str(), prompt, Vec::new())
                .await
        })
        .await
    }

    /// Revise an answer using debug screenshots.
    pub async fn debug(
        &self,
        problem: &ProblemContext,
        current_answer: &str,
        images: &[PathBuf],
    ) -> Result<SolutionContext, WingmanError> {
        self.in_phase(Phase::Debugging, Phase::ReadyToSolve, async {
            let media = load_images(images).await?;
            let prompt = self.prompt(PromptRequest::Debug {
                problem,
                current_answer,
            });
            let solution: SolutionContext = self
                .gateway
                .generate_parsed(PromptKind::Debug.as_str(), prompt, media)
                .await?;
            info!(images = images.len(), "Debug iteration complete");
            Ok(solution)
        })
        .await
    }

    /// Best-effort follow-up: empty replies and failures both come back as `None`.
    pub async fn ask(
        &self,
        question: &str,
        problem: Option<&PriorProblem>,
        prior: Option<&PriorContext>,
    ) -> Option<FollowUpAnswer> {
        let prompt = self.prompt(PromptRequest::FollowUp {
            question,
            problem,
            prior,
        });
        let outcome = self
            .in_phase(Phase::FollowUp, Phase::FollowUp, async {
                self.gateway
                    .generate_text(PromptKind::FollowUp.as_str(), prompt, Vec::new())
                    .await
            })
            .await;

        match outcome {
            Ok(text) if !text.is_empty() => Some(FollowUpAnswer { text }),
            Ok(_) => {
                warn!("Follow-up returned empty text");
                None
            }
            Err(e) => {
                warn!(error = %e, "Follow-up failed; returning no answer");
                None
            }
        }
    }

    pub async fn describe_audio(&self, source: AudioSource) -> Result<MediaDescription, WingmanError> {
        let media = match source {
            AudioSource::File { path } => MediaPart::from_file(&path, DEFAULT_AUDIO_MIME).await?,
            AudioSource::Inline { data, mime_type } => MediaPart::inline(data, mime_type),
        };
        let prompt = self.prompt(PromptRequest::DescribeAudio);
        self.gateway
            .describe_media(PromptKind::DescribeAudio.as_str(), prompt, media)
            .await
    }

    pub async fn describe_image(&self, path: &Path) -> Result<MediaDescription, WingmanError> {
        let media = MediaPart::from_file(path, DEFAULT_IMAGE_MIME).await?;
        let prompt = self.prompt(PromptRequest::DescribeImage);
        self.gateway
            .describe_media(PromptKind::DescribeImage.as_str(), prompt, media)
            .await
    }
}

/// Read and encode images concurrently, preserving order.
async fn load_images(paths: &[PathBuf]) -> Result<Vec<MediaPart>, WingmanError> {
    futures::future::try_join_all(
        paths
            .iter()
            .map(|path| MediaPart::from_file(path, DEFAULT_IMAGE_MIME)),
    )
    .await
}
