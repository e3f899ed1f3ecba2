//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{RemoteErrorKind, WingmanError};

/// Map domain errors to a string for CLI output, with a hint where one is actionable.
pub fn map_error(e: &WingmanError) -> String {
    let hint = match e {
        WingmanError::RemoteService {
            kind: RemoteErrorKind::Auth,
            ..
        } => Some("check provider.api_key or the GEMINI_API_KEY / OPENAI_API_KEY variables"),
        WingmanError::RemoteService {
            kind: RemoteErrorKind::Connect,
            ..
        } => Some("check provider.endpoint and network access"),
        WingmanError::Capture(_) => {
            Some("set capture.preferred_command or capture.fallback_commands for this platform")
        }
        _ => None,
    };
    match hint {
        Some(hint) => format!("error[{}]: {}\n  hint: {}", e.kind_name(), e, hint),
        None => format!("error[{}]: {}", e.kind_name(), e),
    }
}
