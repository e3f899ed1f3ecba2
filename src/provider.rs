//! Model Provider Abstraction
//!
//! Unified interface for sending a prompt, optionally with image or audio attachments,
//! to a remote multimodal model (Gemini, OpenAI-compatible servers, Ollama) and getting
//! text back. Transport failures are mapped to `WingmanError::RemoteService` here, once.

use crate::error::{RemoteErrorKind, WingmanError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod gemini;
pub mod media;
pub mod ollama;
pub mod openai;
pub mod profile;

pub use gemini::GeminiClient;
pub use media::MediaPart;
pub use ollama::OllamaClient;
pub use openai::OpenAIClient;
pub use profile::{ProviderConfig, ProviderType};

/// Resolved provider, ready to build a client from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ModelProvider {
    Gemini {
        model: String,
        api_key: String,
        base_url: Option<String>,
    },
    OpenAI {
        model: String,
        api_key: Option<String>,
        base_url: Option<String>, // For OpenAI-compatible local servers
    },
    Ollama {
        model: String,
        base_url: Option<String>, // Default: http://localhost:11434
    },
}

/// Completion options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

/// One call to the remote model: a text prompt plus zero or more inline media parts.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub prompt: String,
    pub media: Vec<MediaPart>,
    pub options: CompletionOptions,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_media(prompt: impl Into<String>, media: Vec<MediaPart>) -> Self {
        Self {
            prompt: prompt.into(),
            media,
            ..Self::default()
        }
    }

    pub fn has_audio(&self) -> bool {
        self.media.iter().any(MediaPart::is_audio)
    }
}

/// Raw model output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub text: String,
    pub model: String,
    pub finish_reason: Option<String>,
}

/// Model provider client trait
#[async_trait]
pub trait ModelProviderClient: Send + Sync {
    /// Send one request and return the model's raw text
    async fn generate(&self, request: GenerationRequest)
        -> Result<GenerationResponse, WingmanError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Get the model name
    fn model_name(&self) -> &str;
}

// Maps transport-level failures to the remote error taxonomy
pub(crate) fn map_http_error(provider: &str, error: reqwest::Error) -> WingmanError {
    if let Some(status) = error.status() {
        return map_status(provider, status.as_u16(), &error.to_string());
    }
    if error.is_timeout() {
        WingmanError::remote(provider, RemoteErrorKind::Timeout, error.to_string())
    } else if error.is_connect() {
        WingmanError::remote(provider, RemoteErrorKind::Connect, error.to_string())
    } else {
        WingmanError::remote(
            provider,
            RemoteErrorKind::Protocol,
            format!("HTTP error: {}", error),
        )
    }
}

pub(crate) fn map_status(provider: &str, status: u16, body: &str) -> WingmanError {
    let kind = match status {
        401 | 403 => RemoteErrorKind::Auth,
        404 => RemoteErrorKind::ModelNotFound,
        408 => RemoteErrorKind::Timeout,
        429 => RemoteErrorKind::RateLimit,
        other => RemoteErrorKind::Status(other),
    };
    WingmanError::remote(provider, kind, body.to_string())
}

/// Reads a non-success response body and maps it to an error.
pub(crate) async fn error_from_response(provider: &str, response: reqwest::Response) -> WingmanError {
    let status = response.status().as_u16();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    map_status(provider, status, &error_text)
}

const PROVIDER_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn build_provider_http_client(request_timeout: Duration) -> Result<Client, WingmanError> {
    Client::builder()
        .connect_timeout(PROVIDER_HTTP_CONNECT_TIMEOUT)
        .timeout(request_timeout)
        .build()
        .map_err(|e| WingmanError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Provider factory for creating clients
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_client(
        provider: &ModelProvider,
        request_timeout: Duration,
    ) -> Result<Box<dyn ModelProviderClient>, WingmanError> {
        match provider {
            ModelProvider::Gemini {
                model,
                api_key,
                base_url,
            } => Ok(Box::new(GeminiClient::new(
                model.clone(),
                api_key.clone(),
                base_url.clone(),
                request_timeout,
            )?)),
            ModelProvider::OpenAI {
                model,
                api_key,
                base_url,
            } => Ok(Box::new(OpenAIClient::new(
                model.clone(),
                api_key.clone(),
                base_url.clone(),
                request_timeout,
            )?)),
            ModelProvider::Ollama { model, base_url } => Ok(Box::new(OllamaClient::new(
                model.clone(),
                base_url.clone(),
                request_timeout,
            )?)),
        }
    }

    /// Build a client straight from configuration.
    pub fn from_config(
        config: &ProviderConfig,
    ) -> Result<Box<dyn ModelProviderClient>, WingmanError> {
        let provider = config.to_model_provider()?;
        Self::create_client(&provider, config.request_timeout())
    }
}
