//! OpenAI-compatible `chat/completions` client (OpenAI, vLLM, LM Studio, ...).

use super::{
    build_provider_http_client, error_from_response, map_http_error, GenerationRequest,
    GenerationResponse, ModelProviderClient, ProviderType,
};
use crate::error::{RemoteErrorKind, WingmanError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

const PROVIDER: &str = "openai";

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

pub struct OpenAIClient {
    client: Client,
    model: String,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(
        model: String,
        api_key: Option<String>,
        base_url: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, WingmanError> {
        let client = build_provider_http_client(request_timeout)?;
        let base_url = base_url
            .unwrap_or_else(|| ProviderType::OpenAI.default_endpoint().to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            client,
            model,
            api_key,
            base_url,
        })
    }

    fn user_message(request: &GenerationRequest) -> Value {
        if request.media.is_empty() {
            return json!({ "role": "user", "content": request.prompt });
        }

        let mut content_parts = vec![json!({ "type": "text", "text": request.prompt })];
        for part in &request.media {
            if part.is_audio() {
                content_parts.push(json!({
                    "type": "input_audio",
                    "input_audio": { "data": part.data, "format": part.audio_format() }
                }));
            } else {
                content_parts.push(json!({
                    "type": "image_url",
                    "image_url": { "url": part.data_uri() }
                }));
            }
        }
        json!({ "role": "user", "content": content_parts })
    }
}

#[async_trait]
impl ModelProviderClient for OpenAIClient {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, WingmanError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Self::user_message(&request)],
            temperature: request.options.temperature,
            max_tokens: request.options.max_tokens,
            top_p: request.options.top_p,
            stream: false,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let mut builder = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }
        let response = builder
            .send()
            .await
            .map_err(|e| map_http_error(PROVIDER, e))?;

        if !response.status().is_success() {
            return Err(error_from_response(PROVIDER, response).await);
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            WingmanError::remote(
                PROVIDER,
                RemoteErrorKind::Protocol,
                format!("Failed to parse response: {}", e),
            )
        })?;

        let choice = completion.choices.into_iter().next().ok_or_else(|| {
            WingmanError::remote(PROVIDER, RemoteErrorKind::Protocol, "No choices in response")
        })?;

        Ok(GenerationResponse {
            text: choice.message.content.unwrap_or_default(),
            model: completion.model.unwrap_or_else(|| self.model.clone()),
            finish_reason: choice.finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
