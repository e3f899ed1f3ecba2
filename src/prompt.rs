//! Context Builder
//!
//! Composes the instruction sent with every model call. Analysis prompts put the
//! operator override in front of the persona; follow-up prompts let the override
//! replace the persona outright.

use crate::types::ProblemContext;
use serde::{Deserialize, Serialize};

pub mod contract;
pub mod prior;

pub use prior::{PriorContext, PriorProblem};

fn default_persona() -> String {
    contract::DEFAULT_PERSONA.to_string()
}

/// `[prompt]` config section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_persona")]
    pub persona: String,

    /// Initial operator override for new sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_override: Option<String>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            persona: default_persona(),
            operator_override: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Extract,
    Solve,
    Debug,
    DescribeAudio,
    DescribeImage,
    FollowUp,
}

impl PromptKind {
    /// Kinds whose reply must be a bare JSON object
    pub fn is_structured(self) -> bool {
        matches!(self, PromptKind::Extract | PromptKind::Solve | PromptKind::Debug)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromptKind::Extract => "extract",
            PromptKind::Solve => "solve",
            PromptKind::Debug => "debug",
            PromptKind::DescribeAudio => "describe_audio",
            PromptKind::DescribeImage => "describe_image",
            PromptKind::FollowUp => "follow_up",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum PromptRequest<'a> {
    Extract,
    Solve {
        problem: &'a ProblemContext,
    },
    Debug {
        problem: &'a ProblemContext,
        current_answer: &'a str,
    },
    DescribeAudio,
    DescribeImage,
    FollowUp {
        question: &'a str,
        problem: Option<&'a PriorProblem>,
        prior: Option<&'a PriorContext>,
    },
}

impl PromptRequest<'_> {
    pub fn kind(&self) -> PromptKind {
        match self {
            PromptRequest::Extract => PromptKind::Extract,
            PromptRequest::Solve { .. } => PromptKind::Solve,
            PromptRequest::Debug { .. } => PromptKind::Debug,
            PromptRequest::DescribeAudio => PromptKind::DescribeAudio,
            PromptRequest::DescribeImage => PromptKind::DescribeImage,
            PromptRequest::FollowUp { .. } => PromptKind::FollowUp,
        }
    }
}

/// The instruction that opens every prompt. Blank overrides count as unset.
pub fn effective_instruction(
    kind: PromptKind,
    persona: &str,
    operator_override: Option<&str>,
) -> String {
    match operator_override.filter(|o| !o.trim().is_empty()) {
        None => persona.to_string(),
        Some(text) if kind == PromptKind::FollowUp => text.to_string(),
        Some(text) => format!("{}\n\n{}", text, persona),
    }
}

/// Build the full prompt text for one model call.
pub fn build_prompt(
    request: &PromptRequest<'_>,
    persona: &str,
    operator_override: Option<&str>,
) -> String {
    let instruction = effective_instruction(request.kind(), persona, operator_override);

    match request {
        PromptRequest::Extract => format!(
            "{}\n\n{}\n{}\n{}",
            instruction,
            contract::EXTRACT_INSTRUCTION,
            contract::PROBLEM_SCHEMA,
            contract::JSON_ONLY
        ),
        PromptRequest::Solve { problem } => format!(
            "{}\n\nGiven this problem or situation:\n{}\n\n{}\n{}\n{}",
            instruction,
            problem.to_pretty_json(),
            contract::SOLVE_INSTRUCTION,
            contract::SOLUTION_SCHEMA,
            contract::JSON_ONLY
        ),
        PromptRequest::Debug {
            problem,
            current_answer,
        } => format!(
            "{}\n\nYou are a wingman. Given:\n\
             1. The original problem or situation: {}\n\
             2. The current response or approach: {}\n\
             3. The debug information in the provided images\n\n{}\n{}\n{}",
            instruction,
            problem.to_pretty_json(),
            current_answer,
            contract::DEBUG_INSTRUCTION,
            contract::SOLUTION_SCHEMA,
            contract::JSON_ONLY
        ),
        PromptRequest::DescribeAudio => format!("{}\n\n{}", instruction, contract::DESCRIBE_AUDIO),
        PromptRequest::DescribeImage => format!("{}\n\n{}", instruction, contract::DESCRIBE_IMAGE),
        PromptRequest::FollowUp {
            question,
            problem,
            prior,
        } => follow_up_prompt(&instruction, question, *problem, *prior),
    }
}

fn follow_up_prompt(
    instruction: &str,
    question: &str,
    problem: Option<&PriorProblem>,
    prior: Option<&PriorContext>,
) -> String {
    let mut prompt = format!("{}\n\n{}\n\n", instruction, contract::FOLLOW_UP_PREAMBLE);

    if let Some(statement) = problem.map(PriorProblem::render).filter(|s| !s.is_empty()) {
        prompt.push_str(&format!(
            "{}\n{}\n\n",
            contract::FOLLOW_UP_PROBLEM_HEADER,
            statement
        ));
    }

    let previous = prior.map(PriorContext::render).unwrap_or_default();
    if !previous.is_empty() {
        prompt.push_str(&format!(
            "{}\n{}\n\n",
            contract::FOLLOW_UP_PRIOR_HEADER,
            previous
        ));
    }

    prompt.push_str(&format!(
        "{}\n{}\n\n{}",
        contract::FOLLOW_UP_QUESTION_HEADER,
        question,
        contract::FOLLOW_UP_CLOSING
    ));
    prompt
}
