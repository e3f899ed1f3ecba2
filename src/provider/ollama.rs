//! Ollama `/api/generate` client. Accepts images; audio is rejected.

use super::{
    build_provider_http_client, error_from_response, map_http_error, GenerationRequest,
    GenerationResponse, ModelProviderClient, ProviderType,
};
use crate::error::{RemoteErrorKind, WingmanError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROVIDER: &str = "ollama";

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    model: Option<String>,
    #[serde(default)]
    response: String,
    done_reason: Option<String>,
}

pub struct OllamaClient {
    client: Client,
    model: String,
    base_url: String,
}

impl OllamaClient {
    pub fn new(
        model: String,
        base_url: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, WingmanError> {
        let client = build_provider_http_client(request_timeout)?;
        let base_url = base_url
            .unwrap_or_else(|| ProviderType::Ollama.default_endpoint().to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            client,
            model,
            base_url,
        })
    }
}

#[async_trait]
impl ModelProviderClient for OllamaClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, WingmanError> {
        if request.has_audio() {
            return Err(WingmanError::remote(
                PROVIDER,
                RemoteErrorKind::Protocol,
                "Ollama does not accept audio attachments",
            ));
        }

        let options = request.options;
        let body = GenerateRequest {
            model: self.model.clone(),
            prompt: request.prompt,
            images: request.media.into_iter().map(|m| m.data).collect(),
            stream: false,
            options: Some(OllamaOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
                top_p: options.top_p,
            }),
        };

        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_http_error(PROVIDER, e))?;

        if !response.status().is_success() {
            return Err(error_from_response(PROVIDER, response).await);
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            WingmanError::remote(
                PROVIDER,
                RemoteErrorKind::Protocol,
                format!("Failed to parse response: {}", e),
            )
        })?;

        Ok(GenerationResponse {
            text: parsed.response,
            model: parsed.model.unwrap_or_else(|| self.model.clone()),
            finish_reason: parsed.done_reason,
        })
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
