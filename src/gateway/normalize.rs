//! Turn raw model text into a JSON value.

use crate::error::WingmanError;
use serde_json::Value;

const FENCE: &str = "```";

/// Strip one surrounding markdown fence (with optional language tag) and parse.
///
/// Anything that still fails to parse is a `MalformedResponse` carrying the raw text.
pub fn normalize_json(raw: &str) -> Result<Value, WingmanError> {
    let body = strip_fence(raw.trim());
    serde_json::from_str(body.trim()).map_err(|e| WingmanError::MalformedResponse {
        message: e.to_string(),
        raw: raw.to_string(),
    })
}

fn strip_fence(text: &str) -> &str {
    let mut body = text;
    if let Some(rest) = body.strip_prefix(FENCE) {
        // Language tag runs to the end of the opening line.
        body = match rest.find('\n') {
            Some(newline) if is_language_tag(&rest[..newline]) => &rest[newline + 1..],
            Some(_) => rest,
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }
    body.trim_end().strip_suffix(FENCE).unwrap_or(body)
}

fn is_language_tag(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
