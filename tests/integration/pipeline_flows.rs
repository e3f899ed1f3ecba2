//! Extract → solve → debug flows over queued captures

use super::test_utils::Harness;
use serde_json::json;
use wingman::capture::View;
use wingman::error::RemoteErrorKind;
use wingman::session::Phase;
use wingman::testing::PNG_SIGNATURE;
use wingman::types::ProblemContext;
use wingman::WingmanError;

fn problem_reply() -> String {
    format!(
        "```json\n{}\n```",
        json!({
            "problem_statement": "Reverse a linked list",
            "context": "Whiteboard interview",
            "suggested_responses": ["iterate with three pointers", "recurse"],
            "reasoning": "Both are O(n)"
        })
    )
}

fn solution_reply(code: &str) -> String {
    json!({
        "solution": {
            "code": code,
            "problem_statement": "Reverse a linked list",
            "context": "Whiteboard interview",
            "suggested_responses": ["walk through an example"],
            "reasoning": "Iterative avoids stack depth"
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_extract_then_solve_embeds_problem() {
    let harness = Harness::new(vec![Ok(problem_reply()), Ok(solution_reply("prev = None"))]);
    harness.api.capture_screen().await.unwrap();
    harness.api.capture_screen().await.unwrap();

    let problem = harness.api.extract_problem_from_queue().await.unwrap();
    assert_eq!(problem.problem_statement, "Reverse a linked list");
    assert_eq!(problem.context, "Whiteboard interview");
    assert_eq!(problem.suggested_responses.len(), 2);
    assert_eq!(problem.reasoning, "Both are O(n)");
    assert_eq!(harness.api.phase(), Phase::ReadyToSolve);

    let solution = harness.api.generate_solution(&problem).await.unwrap();
    assert_eq!(solution.solution.code, "prev = None");

    let requests = harness.client.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].media.len(), 2);
    assert!(requests[0].media.iter().all(|m| m.mime_type == "image/png"));
    assert!(requests[0].prompt.contains("\"problem_statement\""));
    assert!(requests[1].media.is_empty());
    assert!(requests[1].prompt.contains(&problem.to_pretty_json()));
}

#[tokio::test]
async fn test_debug_attaches_supplementary_images_only() {
    let harness = Harness::new(vec![Ok(solution_reply("fixed"))]);
    harness.api.capture_screen().await.unwrap();
    harness.api.set_view(View::Solutions);
    let debug_shot = harness.api.capture_screen().await.unwrap().path;

    let problem = ProblemContext {
        problem_statement: "Reverse a linked list".to_string(),
        ..ProblemContext::default()
    };
    let revised = harness
        .api
        .debug_solution_from_queue(&problem, "prev = head")
        .await
        .unwrap();
    assert_eq!(revised.solution.code, "fixed");
    assert_eq!(harness.api.phase(), Phase::ReadyToSolve);

    let request = &harness.client.requests()[0];
    assert_eq!(request.media.len(), 1);
    assert!(debug_shot.exists());
    assert!(request
        .prompt
        .contains("2. The current response or approach: prev = head"));
}

#[tokio::test]
async fn test_explicit_images_are_sent_in_order() {
    let harness = Harness::new(vec![Ok(problem_reply())]);
    let first = harness.root().join("first.png");
    let second = harness.root().join("second.jpg");
    std::fs::write(&first, PNG_SIGNATURE).unwrap();
    std::fs::write(&second, b"jpeg").unwrap();

    harness
        .api
        .extract_problem(&[first, second])
        .await
        .unwrap();
    let media = &harness.client.requests()[0].media;
    assert_eq!(media[0].mime_type, "image/png");
    assert_eq!(media[1].mime_type, "image/jpeg");
}

#[tokio::test]
async fn test_malformed_reply_fails_flow() {
    let harness = Harness::new(vec![Ok("I could not read the screenshot.".to_string())]);
    let err = harness.api.extract_problem(&[]).await.unwrap_err();
    assert!(matches!(err, WingmanError::MalformedResponse { .. }));
    assert_eq!(harness.api.phase(), Phase::Idle);
}

#[tokio::test]
async fn test_remote_failure_aborts_solve() {
    let harness = Harness::new(vec![
        Ok(problem_reply()),
        Err(WingmanError::remote(
            "scripted",
            RemoteErrorKind::Timeout,
            "deadline exceeded",
        )),
    ]);
    let problem = harness.api.extract_problem(&[]).await.unwrap();
    let err = harness.api.generate_solution(&problem).await.unwrap_err();
    assert!(matches!(
        err,
        WingmanError::RemoteService {
            kind: RemoteErrorKind::Timeout,
            ..
        }
    ));
    assert_eq!(harness.api.phase(), Phase::ReadyToSolve);
}

#[tokio::test]
async fn test_operator_override_prefixes_analysis_prompts() {
    let harness = Harness::new(vec![Ok(problem_reply())]);
    harness.api.set_operator_override("Focus on Rust.");
    harness.api.extract_problem(&[]).await.unwrap();
    let prompt = harness.client.last_prompt().unwrap();
    assert!(prompt.starts_with("Focus on Rust.\n\nYou are a test persona."));
}

#[tokio::test]
async fn test_describe_image_from_file() {
    let harness = Harness::new(vec![Ok("A terminal with a stack trace.".to_string())]);
    let image = harness.root().join("screen.png");
    std::fs::write(&image, PNG_SIGNATURE).unwrap();

    let description = harness.api.describe_image(&image).await.unwrap();
    assert_eq!(description.text, "A terminal with a stack trace.");
    assert!(description.timestamp > 0);
    let prompt = harness.client.last_prompt().unwrap();
    assert!(prompt.contains("Describe the content of this image"));
}

#[tokio::test]
async fn test_loosely_typed_replies_still_parse() {
    let problem = json!({
        "problem_statement": "X",
        "context": null,
        "suggested_responses": "one item",
        "reasoning": ["look", "decide"]
    });
    let solution = json!({"solution": {"code": "Y", "reasoning": ["step1", "step2"]}});
    let harness = Harness::new(vec![Ok(problem.to_string()), Ok(solution.to_string())]);
    harness.api.capture_screen().await.unwrap();

    let problem = harness.api.extract_problem_from_queue().await.unwrap();
    assert_eq!(problem.problem_statement, "X");
    assert!(problem.context.is_empty());
    assert_eq!(problem.suggested_responses, vec!["one item"]);
    assert_eq!(problem.reasoning, "look\ndecide");

    let solution = harness.api.generate_solution(&problem).await.unwrap();
    assert_eq!(solution.solution.code, "Y");
    assert_eq!(solution.solution.reasoning, "step1\nstep2");
    assert_eq!(harness.api.phase(), Phase::ReadyToSolve);
}
