//! Follow-up prompts over prior problem and answer payloads

use super::test_utils::Harness;
use serde_json::json;
use wingman::error::RemoteErrorKind;
use wingman::prompt::PriorContext;
use wingman::session::Phase;
use wingman::WingmanError;

#[tokio::test]
async fn test_follow_up_carries_prior_context() {
    let harness = Harness::new(vec![Ok("Check the empty list case.".to_string())]);
    let answer = harness
        .api
        .ask_follow_up_json(
            "what about edge cases?",
            json!({"problem_statement": "X"}),
            json!({"solution": {"code": "Y", "thoughts": ["Z"]}}),
        )
        .await
        .unwrap();
    assert_eq!(answer.text, "Check the empty list case.");
    assert_eq!(harness.api.phase(), Phase::FollowUp);

    let prompt = harness.client.last_prompt().unwrap();
    let question_at = prompt.find("what about edge cases?").unwrap();
    let problem_at = prompt.find("Original Problem Context:\nX\n").unwrap();
    let prior_at = prompt
        .find("Your Previous Response/Solution:\nY\nAnalysis: Z\n")
        .unwrap();
    assert!(problem_at < prior_at);
    assert!(prior_at < question_at);
}

#[tokio::test]
async fn test_empty_reply_is_no_answer() {
    let harness = Harness::new(vec![Ok(String::new())]);
    let answer = harness
        .api
        .ask_follow_up_json("anything else?", json!(null), json!(null))
        .await;
    assert!(answer.is_none());
}

#[tokio::test]
async fn test_whitespace_reply_is_passed_through() {
    let harness = Harness::new(vec![Ok("  \n".to_string())]);
    let answer = harness.api.ask_follow_up("anything else?", None, None).await;
    assert_eq!(answer.map(|a| a.text).as_deref(), Some("  \n"));
}

#[tokio::test]
async fn test_remote_failure_is_no_answer() {
    let harness = Harness::new(vec![Err(WingmanError::remote(
        "scripted",
        RemoteErrorKind::Connect,
        "refused",
    ))]);
    let answer = harness.api.ask_follow_up("still there?", None, None).await;
    assert!(answer.is_none());
    assert_eq!(harness.api.phase(), Phase::Idle);
}

#[tokio::test]
async fn test_override_replaces_persona() {
    let harness = Harness::new(vec![Ok("Oui.".to_string())]);
    harness.api.set_operator_override("Answer in French.");
    let prior = PriorContext::PlainText("A cat on a keyboard.".to_string());
    harness
        .api
        .ask_follow_up("Is it typing?", None, Some(&prior))
        .await
        .unwrap();

    let prompt = harness.client.last_prompt().unwrap();
    assert!(prompt.starts_with("Answer in French.\n\n"));
    assert!(!prompt.contains("You are a test persona."));
    assert!(prompt.contains("Your Previous Response/Solution:\nA cat on a keyboard."));
}

#[tokio::test]
async fn test_unknown_prior_is_rendered_as_json() {
    let harness = Harness::new(vec![Ok("ok".to_string())]);
    harness
        .api
        .ask_follow_up_json("next?", json!("plain problem"), json!({"score": 3}))
        .await
        .unwrap();
    let prompt = harness.client.last_prompt().unwrap();
    assert!(prompt.contains("Original Problem Context:\nplain problem"));
    assert!(prompt.contains("\"score\": 3"));
}
