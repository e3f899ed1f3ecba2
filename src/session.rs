//! Per-session orchestration state: active view, operator override, persona, phase.
//!
//! Nothing here is persisted. Tests build their own `Session` instead of sharing one.

use crate::capture::View;
use crate::prompt::PromptConfig;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where the session stands in the extract → solve → debug → follow-up progression.
///
/// Phases are reported, not enforced: every flow may be called at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Extracting,
    ReadyToSolve,
    Solving,
    Debugging,
    FollowUp,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Extracting => "extracting",
            Phase::ReadyToSolve => "ready_to_solve",
            Phase::Solving => "solving",
            Phase::Debugging => "debugging",
            Phase::FollowUp => "follow_up",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct Session {
    view: RwLock<View>,
    operator_override: RwLock<Option<String>>,
    persona: String,
    phase: RwLock<Phase>,
}

impl Session {
    pub fn new(persona: impl Into<String>) -> Self {
        Self {
            view: RwLock::new(View::default()),
            operator_override: RwLock::new(None),
            persona: persona.into(),
            phase: RwLock::new(Phase::Idle),
        }
    }

    pub fn from_config(config: &PromptConfig) -> Self {
        let session = Self::new(config.persona.clone());
        if let Some(text) = &config.operator_override {
            session.set_operator_override(text);
        }
        session
    }

    pub fn view(&self) -> View {
        *self.view.read()
    }

    pub fn set_view(&self, view: View) {
        debug!(%view, "View changed");
        *self.view.write() = view;
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn operator_override(&self) -> Option<String> {
        self.operator_override.read().clone()
    }

    /// Blank text clears the override. Anything else is stored as given.
    pub fn set_operator_override(&self, text: &str) {
        let value = (!text.trim().is_empty()).then(|| text.to_string());
        *self.operator_override.write() = value;
    }

    pub fn phase(&self) -> Phase {
        *self.phase.read()
    }

    /// Move to `next`, returning the phase that was current before.
    pub fn enter(&self, next: Phase) -> Phase {
        let mut phase = self.phase.write();
        let previous = *phase;
        *phase = next;
        debug!(from = %previous, to = %next, "Phase transition");
        previous
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::from_config(&PromptConfig::default())
    }
}
