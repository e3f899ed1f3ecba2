//! Conversation artifacts carried into a follow-up.
//!
//! UI payloads arrive loosely typed; `from_value` classifies them once so prompt
//! construction only ever sees the tagged unions below.

use crate::types::{ProblemContext, SolutionContext};
use serde_json::Value;

/// The answer the user is following up on
#[derive(Debug, Clone, PartialEq)]
pub enum PriorContext {
    /// Media descriptions and other free text
    PlainText(String),
    /// Output of solve or debug
    StructuredSolution(SolutionContext),
    /// Anything else; rendered as pretty JSON
    Unknown(Value),
}

impl PriorContext {
    /// Classify a UI payload. `null` means no prior context.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(text) => Some(PriorContext::PlainText(text)),
            Value::Object(ref map) => {
                let has_code = map
                    .get("solution")
                    .and_then(|s| s.get("code"))
                    .map(Value::is_string)
                    .unwrap_or(false);
                if has_code {
                    if let Ok(solution) = serde_json::from_value::<SolutionContext>(value.clone()) {
                        return Some(PriorContext::StructuredSolution(solution));
                    }
                }
                if let Some(Value::String(text)) = map.get("text") {
                    return Some(PriorContext::PlainText(text.clone()));
                }
                Some(PriorContext::Unknown(value))
            }
            other => Some(PriorContext::Unknown(other)),
        }
    }

    /// Text placed under the previous-response header.
    pub fn render(&self) -> String {
        match self {
            PriorContext::PlainText(text) => text.clone(),
            PriorContext::StructuredSolution(ctx) => {
                let mut rendered = ctx.solution.code.clone();
                if !ctx.solution.thoughts.is_empty() {
                    rendered.push_str("\nAnalysis: ");
                    rendered.push_str(&ctx.solution.thoughts.join(" "));
                }
                rendered
            }
            PriorContext::Unknown(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

impl From<SolutionContext> for PriorContext {
    fn from(ctx: SolutionContext) -> Self {
        PriorContext::StructuredSolution(ctx)
    }
}

/// The problem being discussed
#[derive(Debug, Clone, PartialEq)]
pub enum PriorProblem {
    Structured(ProblemContext),
    PlainText(String),
}

impl PriorProblem {
    /// Objects need a string `problem_statement`; other shapes carry nothing usable.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(PriorProblem::PlainText(text)),
            Value::Object(ref map) if map.get("problem_statement").map_or(false, Value::is_string) => {
                serde_json::from_value::<ProblemContext>(value)
                    .ok()
                    .map(PriorProblem::Structured)
            }
            _ => None,
        }
    }

    pub fn render(&self) -> &str {
        match self {
            PriorProblem::Structured(problem) => &problem.problem_statement,
            PriorProblem::PlainText(text) => text,
        }
    }
}

impl From<ProblemContext> for PriorProblem {
    fn from(problem: ProblemContext) -> Self {
        PriorProblem::Structured(problem)
    }
}
