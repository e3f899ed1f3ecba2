//! Inline media attachments (base64 payload plus MIME type).

use crate::error::WingmanError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_IMAGE_MIME: &str = "image/png";
pub const DEFAULT_AUDIO_MIME: &str = "audio/mp3";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPart {
    pub mime_type: String,
    /// Base64-encoded bytes
    pub data: String,
}

impl MediaPart {
    /// Wrap an already-encoded payload.
    pub fn inline(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::inline(BASE64.encode(bytes), mime_type)
    }

    /// Read a file and encode it; the MIME type comes from the extension, else `default_mime`.
    pub async fn from_file(path: &Path, default_mime: &str) -> Result<Self, WingmanError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| WingmanError::io(path, e))?;
        Ok(Self::from_bytes(&bytes, mime_for_path(path, default_mime)))
    }

    pub fn is_audio(&self) -> bool {
        self.mime_type.starts_with("audio/")
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Short container name for APIs that want a format instead of a MIME type.
    pub fn audio_format(&self) -> &str {
        match self.mime_type.as_str() {
            "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
            other => other.strip_prefix("audio/").unwrap_or("mp3"),
        }
    }
}

/// Guess a MIME type from a file extension.
pub fn mime_for_path(path: &Path, default_mime: &str) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    let mime = match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("mp3") => "audio/mp3",
        Some("wav") => "audio/wav",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("ogg") => "audio/ogg",
        Some("webm") => "audio/webm",
        Some("flac") => "audio/flac",
        _ => default_mime,
    };
    mime.to_string()
}
