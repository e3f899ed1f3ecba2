//! Fixed prompt text: the output contracts each flow asks the model to honor.

pub const DEFAULT_PERSONA: &str = "You are Wingman AI, a helpful, proactive assistant for any kind of problem or situation (not just coding). For any user input, analyze the situation, provide a clear problem statement, relevant context, and suggest several possible responses or actions the user could take next. Always explain your reasoning. Present your suggestions as a list of options or next steps.";

/// Closing line of every structured prompt
pub const JSON_ONLY: &str =
    "Important: Return ONLY the JSON object, without any markdown formatting or code blocks.";

pub const PROBLEM_SCHEMA: &str = r#"{
  "problem_statement": "A clear statement of the problem or situation depicted in the images.",
  "context": "Relevant background or context from the images.",
  "suggested_responses": ["First possible answer or action", "Second possible answer or action", "..."],
  "reasoning": "Explanation of why these suggestions are appropriate."
}"#;

pub const SOLUTION_SCHEMA: &str = r#"{
  "solution": {
    "code": "The code or main answer here.",
    "problem_statement": "Restate the problem or situation.",
    "context": "Relevant background/context.",
    "suggested_responses": ["First possible answer or action", "Second possible answer or action", "..."],
    "reasoning": "Explanation of why these suggestions are appropriate."
  }
}"#;

pub const EXTRACT_INSTRUCTION: &str = "You are a wingman. Please analyze these images and extract the following information in JSON format:";

pub const SOLVE_INSTRUCTION: &str = "Please provide your response in the following JSON format:";

pub const DEBUG_INSTRUCTION: &str =
    "Please analyze the debug information and provide feedback in this JSON format:";

pub const DESCRIBE_AUDIO: &str = "Describe this audio clip in a short, concise answer. In addition to your main answer, suggest several possible actions or responses the user could take next based on the audio. Do not return a structured JSON object, just answer naturally as you would to a user and be concise.";

pub const DESCRIBE_IMAGE: &str = "Describe the content of this image in a short, concise answer. In addition to your main answer, suggest several possible actions or responses the user could take next based on the image. Do not return a structured JSON object, just answer naturally as you would to a user. Be concise and brief.";

pub const FOLLOW_UP_PREAMBLE: &str = "You are in a continued conversation. Please answer the user's follow-up question based on the prior context.";

pub const FOLLOW_UP_PROBLEM_HEADER: &str = "Original Problem Context:";
pub const FOLLOW_UP_PRIOR_HEADER: &str = "Your Previous Response/Solution:";
pub const FOLLOW_UP_QUESTION_HEADER: &str = "User's Follow-up Question:";
pub const FOLLOW_UP_CLOSING: &str =
    "Please provide a concise and relevant answer to the follow-up question.";
