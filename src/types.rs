//! Records produced by the analysis flows and handed back in as context.
//!
//! Fields the model omits or sends as `null` default to empty. A documented field
//! holding some other JSON type is converted to text instead of failing the flow.
//! Fields the model adds are kept in `extra` and serialized back out unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output of problem extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemContext {
    #[serde(default, deserialize_with = "lenient::text")]
    pub problem_statement: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub context: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub suggested_responses: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub reasoning: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProblemContext {
    /// Pretty JSON as embedded into solve and debug prompts.
    pub fn to_pretty_json(&self) -> String {
        // String keys and plain values only, so serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    #[serde(default, deserialize_with = "lenient::text")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub problem_statement: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub context: String,
    #[serde(default, deserialize_with = "lenient::list")]
    pub suggested_responses: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub reasoning: String,
    #[serde(
        default,
        deserialize_with = "lenient::list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub thoughts: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Output of solve and debug: `{ "solution": { ... } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolutionContext {
    pub solution: Solution,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Natural-language answer from a describe flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescription {
    pub text: String,
    /// Unix epoch milliseconds
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpAnswer {
    pub text: String,
}

/// Decoders for record fields whose JSON type the model does not reliably honor.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Value::deserialize(deserializer).map(into_text)
    }

    pub fn list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => Vec::new(),
            Value::Array(items) => items.into_iter().map(into_text).collect(),
            Value::String(item) if item.is_empty() => Vec::new(),
            other => vec![into_text(other)],
        })
    }

    /// Strings pass through, lists become one line per item, anything else is compact JSON.
    fn into_text(value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(text) => text,
            Value::Array(items) => items
                .into_iter()
                .map(into_text)
                .collect::<Vec<_>>()
                .join("\n"),
            other => other.to_string(),
        }
    }
}
