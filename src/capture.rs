//! Screenshot capture: two bounded on-disk queues and the strategy that fills them.
//!
//! New captures land in the queue selected by the session's [`View`]:
//! `queue` feeds the primary queue (problem extraction), `solutions` feeds the
//! supplementary queue (debug iterations).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

pub mod queue;
pub mod store;
pub mod strategy;
pub mod visibility;

pub use queue::{CaptureArtifact, CaptureQueue};
pub use store::CaptureStore;
pub use strategy::{
    BackendChain, CaptureBackend, CaptureStrategy, CommandBackend, FallbackCapture,
};
pub use visibility::{NoopVisibility, VisibilityGuard, WindowVisibility};

pub const DEFAULT_CAPACITY: usize = 5;

/// Which queue receives new captures and listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Queue,
    Solutions,
}

impl View {
    pub fn queue_kind(self) -> QueueKind {
        match self {
            View::Queue => QueueKind::Primary,
            View::Solutions => QueueKind::Supplementary,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            View::Queue => "queue",
            View::Solutions => "solutions",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "queue" => Ok(View::Queue),
            "solutions" => Ok(View::Solutions),
            other => Err(format!(
                "Invalid view: {} (must be 'queue' or 'solutions')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueKind {
    Primary,
    Supplementary,
}

impl QueueKind {
    /// Directory name beneath the capture data dir
    pub fn dir_name(self) -> &'static str {
        match self {
            QueueKind::Primary => "screenshots",
            QueueKind::Supplementary => "extra_screenshots",
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// Capture settings from the `[capture]` config section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Maximum artifacts per queue
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Parent directory of `screenshots/` and `extra_screenshots/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Preferred native capture command, whitespace-separated, `{path}` is the destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_command: Option<String>,

    /// Generic capture commands tried in order; empty means the platform defaults
    #[serde(default)]
    pub fallback_commands: Vec<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            data_dir: None,
            preferred_command: None,
            fallback_commands: Vec::new(),
        }
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.capacity == 0 {
            return Err("capacity must be at least 1".to_string());
        }
        for template in self.preferred_command.iter().chain(&self.fallback_commands) {
            if !template.contains("{path}") {
                return Err(format!(
                    "capture command must contain a {{path}} placeholder: {}",
                    template
                ));
            }
        }
        Ok(())
    }

    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", "wingman")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".wingman"))
    }
}
