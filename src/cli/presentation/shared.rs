//! Shared presentation helpers.

use owo_colors::OwoColorize;
use serde::Serialize;

pub fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

pub fn heading(title: &str) -> String {
    format!("{}", title.bold().cyan())
}

/// Numbered list, one item per line, indented under a heading.
pub fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("  {}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}
