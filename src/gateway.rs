//! AI Gateway
//!
//! The single edge between the pipeline and a model provider. Every call is logged
//! here; provider errors are already typed and are passed through unchanged.

use crate::error::WingmanError;
use crate::provider::{CompletionOptions, GenerationRequest, MediaPart, ModelProviderClient};
use crate::types::MediaDescription;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

pub mod normalize;

pub use normalize::normalize_json;

#[derive(Clone)]
pub struct AiGateway {
    client: Arc<dyn ModelProviderClient>,
    options: CompletionOptions,
}

impl AiGateway {
    pub fn new(client: Arc<dyn ModelProviderClient>) -> Self {
        Self {
            client,
            options: CompletionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Send a prompt with optional attachments and return the raw reply text.
    pub async fn generate_text(
        &self,
        operation: &str,
        prompt: String,
        media: Vec<MediaPart>,
    ) -> Result<String, WingmanError> {
        let request = GenerationRequest {
            prompt,
            media,
            options: self.options.clone(),
        };
        let attachments = request.media.len();
        debug!(
            operation,
            provider = self.client.provider_name(),
            model = self.client.model_name(),
            attachments,
            prompt_chars = request.prompt.len(),
            "Sending model request"
        );

        let started = Instant::now();
        match self.client.generate(request).await {
            Ok(response) => {
                info!(
                    operation,
                    model = %response.model,
                    duration_ms = started.elapsed().as_millis() as u64,
                    response_chars = response.text.len(),
                    "Model request completed"
                );
                Ok(response.text)
            }
            Err(e) => {
                error!(
                    operation,
                    provider = self.client.provider_name(),
                    error = %e,
                    "Model request failed"
                );
                Err(e)
            }
        }
    }

    /// Send a structured prompt and normalize the reply to JSON.
    pub async fn generate_json(
        &self,
        operation: &str,
        prompt: String,
        media: Vec<MediaPart>,
    ) -> Result<Value, WingmanError> {
        let raw = self.generate_text(operation, prompt, media).await?;
        normalize_json(&raw).map_err(|e| {
            error!(operation, error = %e, "Model reply was not valid JSON");
            e
        })
    }

    /// Like `generate_json`, then deserialize into `T`. Shape mismatches are malformed replies.
    pub async fn generate_parsed<T: DeserializeOwned>(
        &self,
        operation: &str,
        prompt: String,
        media: Vec<MediaPart>,
    ) -> Result<T, WingmanError> {
        let value = self.generate_json(operation, prompt, media).await?;
        serde_json::from_value(value.clone()).map_err(|e| {
            error!(operation, error = %e, "Model reply did not match the expected shape");
            WingmanError::MalformedResponse {
                message: e.to_string(),
                raw: value.to_string(),
            }
        })
    }

    /// Unstructured describe call stamped with the completion time.
    pub async fn describe_media(
        &self,
        operation: &str,
        prompt: String,
        media: MediaPart,
    ) -> Result<MediaDescription, WingmanError> {
        let text = self.generate_text(operation, prompt, vec![media]).await?;
        Ok(MediaDescription {
            text,
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }
}
