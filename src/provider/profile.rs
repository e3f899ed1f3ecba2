//! Provider configuration as written in config files.

use super::{CompletionOptions, ModelProvider};
use crate::error::WingmanError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Gemini,
    OpenAI,
    Ollama,
}

impl ProviderType {
    pub fn parse(type_str: &str) -> Result<Self, WingmanError> {
        match type_str {
            "gemini" => Ok(ProviderType::Gemini),
            "openai" => Ok(ProviderType::OpenAI),
            "ollama" => Ok(ProviderType::Ollama),
            _ => Err(WingmanError::Config(format!(
                "Invalid provider type: {}. Must be gemini, openai, or ollama",
                type_str
            ))),
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ProviderType::Gemini => "gemini",
            ProviderType::OpenAI => "openai",
            ProviderType::Ollama => "ollama",
        }
    }

    pub fn default_endpoint(self) -> &'static str {
        match self {
            ProviderType::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            ProviderType::OpenAI => "https://api.openai.com/v1",
            ProviderType::Ollama => "http://localhost:11434",
        }
    }

    /// Environment variable consulted when no api_key is configured.
    pub fn api_key_env_var(self) -> Option<&'static str> {
        match self {
            ProviderType::Gemini => Some("GEMINI_API_KEY"),
            ProviderType::OpenAI => Some("OPENAI_API_KEY"),
            ProviderType::Ollama => None,
        }
    }
}

fn default_provider_type() -> ProviderType {
    ProviderType::Gemini
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_type")]
    pub provider_type: ProviderType,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL override (e.g. an OpenAI-compatible local server)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Upper bound on one remote call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub default_options: CompletionOptions,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            model: default_model(),
            api_key: None,
            endpoint: None,
            request_timeout_secs: default_request_timeout_secs(),
            default_options: CompletionOptions::default(),
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(format!(
                    "Endpoint must start with http:// or https://: {}",
                    endpoint
                ));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than zero".to_string());
        }
        if let Some(t) = self.default_options.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(format!("temperature must be within 0.0-2.0, got {}", t));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured key, else the provider's well-known environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                self.provider_type
                    .api_key_env_var()
                    .and_then(|var| std::env::var(var).ok())
                    .filter(|k| !k.trim().is_empty())
            })
    }

    pub fn to_model_provider(&self) -> Result<ModelProvider, WingmanError> {
        let model = self.model.clone();
        let base_url = self.endpoint.clone();
        match self.provider_type {
            ProviderType::Gemini => {
                let api_key = self.resolve_api_key().ok_or_else(|| {
                    WingmanError::Config(
                        "Gemini provider requires api_key or GEMINI_API_KEY".to_string(),
                    )
                })?;
                Ok(ModelProvider::Gemini {
                    model,
                    api_key,
                    base_url,
                })
            }
            ProviderType::OpenAI => {
                let api_key = self.resolve_api_key();
                if api_key.is_none() && base_url.is_none() {
                    return Err(WingmanError::Config(
                        "OpenAI provider requires api_key or OPENAI_API_KEY unless an endpoint is set"
                            .to_string(),
                    ));
                }
                Ok(ModelProvider::OpenAI {
                    model,
                    api_key,
                    base_url,
                })
            }
            ProviderType::Ollama => Ok(ModelProvider::Ollama { model, base_url }),
        }
    }
}
