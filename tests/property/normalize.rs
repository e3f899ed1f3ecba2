//! Fenced and unfenced replies normalize to the same value

use proptest::prelude::*;
use serde_json::json;
use wingman::gateway::normalize_json;

proptest! {
    #[test]
    fn fence_is_transparent(
        statement in "[a-zA-Z0-9 .,]{0,40}",
        responses in proptest::collection::vec("[a-z ]{0,12}", 0..4),
        tag in prop_oneof![Just(""), Just("json"), Just("JSON")],
    ) {
        let value = json!({
            "problem_statement": statement,
            "suggested_responses": responses,
        });
        let raw = serde_json::to_string_pretty(&value).unwrap();
        let fenced = format!("```{}\n{}\n```", tag, raw);

        prop_assert_eq!(normalize_json(&raw).unwrap(), value.clone());
        prop_assert_eq!(normalize_json(&fenced).unwrap(), value);
    }

    #[test]
    fn prose_is_malformed(text in "[a-zA-Z ]{1,40}") {
        // Letters and spaces alone never form JSON (true/false/null excepted).
        prop_assume!(!matches!(text.trim(), "true" | "false" | "null" | ""));
        prop_assert!(normalize_json(&text).is_err());
    }
}
