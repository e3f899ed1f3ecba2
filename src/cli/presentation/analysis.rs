//! Problem, solution, description and follow-up presentation.

use super::shared::{heading, numbered, to_json};
use crate::types::{FollowUpAnswer, MediaDescription, ProblemContext, SolutionContext};
use owo_colors::OwoColorize;

pub fn format_problem(problem: &ProblemContext, format: &str) -> String {
    if format == "json" {
        return to_json(problem);
    }
    let mut out = format!("{}\n{}\n", heading("Problem"), problem.problem_statement);
    if !problem.context.is_empty() {
        out.push_str(&format!("\n{}\n{}\n", heading("Context"), problem.context));
    }
    if !problem.suggested_responses.is_empty() {
        out.push_str(&format!(
            "\n{}\n{}\n",
            heading("Suggested responses"),
            numbered(&problem.suggested_responses)
        ));
    }
    if !problem.reasoning.is_empty() {
        out.push_str(&format!("\n{}\n{}\n", heading("Reasoning"), problem.reasoning));
    }
    out
}

pub fn format_solution(solution: &SolutionContext, format: &str) -> String {
    if format == "json" {
        return to_json(solution);
    }
    let s = &solution.solution;
    let mut out = format!("{}\n{}\n", heading("Answer"), s.code);
    if !s.suggested_responses.is_empty() {
        out.push_str(&format!(
            "\n{}\n{}\n",
            heading("Suggested responses"),
            numbered(&s.suggested_responses)
        ));
    }
    if !s.reasoning.is_empty() {
        out.push_str(&format!("\n{}\n{}\n", heading("Reasoning"), s.reasoning));
    }
    if !s.thoughts.is_empty() {
        out.push_str(&format!("\n{}\n{}\n", heading("Thoughts"), s.thoughts.join(" ")));
    }
    out
}

pub fn format_description(description: &MediaDescription, format: &str) -> String {
    if format == "json" {
        return to_json(description);
    }
    description.text.trim_end().to_string()
}

pub fn format_follow_up(answer: Option<&FollowUpAnswer>, format: &str) -> String {
    match (answer, format) {
        (answer, "json") => to_json(&answer),
        (Some(answer), _) => answer.text.trim_end().to_string(),
        (None, _) => format!("{}", "No answer.".dimmed()),
    }
}
