//! Error types for the Wingman capture and analysis pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Classification of a remote model failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    Auth,
    RateLimit,
    ModelNotFound,
    Timeout,
    Connect,
    Status(u16),
    Protocol,
}

impl std::fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteErrorKind::Auth => write!(f, "authentication failed"),
            RemoteErrorKind::RateLimit => write!(f, "rate limit exceeded"),
            RemoteErrorKind::ModelNotFound => write!(f, "model not found"),
            RemoteErrorKind::Timeout => write!(f, "request timeout"),
            RemoteErrorKind::Connect => write!(f, "connection error"),
            RemoteErrorKind::Status(code) => write!(f, "status {}", code),
            RemoteErrorKind::Protocol => write!(f, "protocol error"),
        }
    }
}

/// Errors surfaced by capture, gateway, and pipeline operations
#[derive(Debug, Error)]
pub enum WingmanError {
    /// Preferred and fallback capture mechanisms both failed
    #[error("Capture failed: {0}")]
    Capture(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote reply could not be parsed into the expected JSON
    #[error("Malformed model response: {message}")]
    MalformedResponse { message: String, raw: String },

    #[error("Remote service error from {provider} ({kind}): {message}")]
    RemoteService {
        provider: String,
        kind: RemoteErrorKind,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WingmanError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WingmanError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn remote(
        provider: impl Into<String>,
        kind: RemoteErrorKind,
        message: impl Into<String>,
    ) -> Self {
        WingmanError::RemoteService {
            provider: provider.into(),
            kind,
            message: message.into(),
        }
    }

    /// Stable short name for the taxonomy kind, used in logs and CLI output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            WingmanError::Capture(_) => "capture",
            WingmanError::Io { .. } => "io",
            WingmanError::MalformedResponse { .. } => "malformed_response",
            WingmanError::RemoteService { .. } => "remote_service",
            WingmanError::Config(_) => "config",
        }
    }
}

impl From<config::ConfigError> for WingmanError {
    fn from(err: config::ConfigError) -> Self {
        WingmanError::Config(err.to_string())
    }
}
