//! CLI route: single route table and run context. Dispatches to `WingmanApi` and presentation.

use crate::api::WingmanApi;
use crate::capture::{NoopVisibility, View};
use crate::cli::parse::{Commands, ConfigCommands};
use crate::cli::presentation::{
    format_captures, format_config_validation, format_description, format_follow_up,
    format_problem, format_solution,
};
use crate::cli::map_error;
use crate::config::{ConfigLoader, WingmanConfig};
use crate::error::WingmanError;
use crate::pipeline::AudioSource;
use crate::prompt::{PriorContext, PriorProblem};
use crate::provider::media::DEFAULT_AUDIO_MIME;
use crate::provider::MediaPart;
use crate::types::{ProblemContext, SolutionContext};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded config plus the async runtime.
/// The API is built per command so `config validate` works on a broken config.
pub struct RunContext {
    config: WingmanConfig,
    workspace_root: PathBuf,
    config_path: Option<PathBuf>,
    runtime: Runtime,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, WingmanError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        let runtime = Runtime::new()
            .map_err(|e| WingmanError::Config(format!("Failed to create runtime: {}", e)))?;
        Ok(Self {
            config,
            workspace_root,
            config_path,
            runtime,
        })
    }

    pub fn config(&self) -> &WingmanConfig {
        &self.config
    }

    fn api(&self) -> Result<WingmanApi, WingmanError> {
        let config = self.config.clone().validated()?;
        WingmanApi::from_config(&config, Arc::new(NoopVisibility))
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, WingmanError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        debug!(
            duration_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, WingmanError> {
        match command {
            Commands::Session => self.handle_session(),
            Commands::DescribeImage { path, format } => {
                let api = self.api()?;
                let description = self.runtime.block_on(api.describe_image(path))?;
                Ok(format_description(&description, format))
            }
            Commands::DescribeAudio {
                path,
                mime_type,
                format,
            } => {
                let api = self.api()?;
                let source = self.audio_source(path, mime_type.as_deref())?;
                let description = self.runtime.block_on(api.describe_audio(source))?;
                Ok(format_description(&description, format))
            }
            Commands::Solve { images, format } => self.handle_solve(images, format),
            Commands::Ask {
                question,
                problem,
                previous,
                format,
            } => {
                let api = self.api()?;
                let problem = problem.clone().map(PriorProblem::PlainText);
                let previous = previous.clone().map(PriorContext::PlainText);
                let answer = self.runtime.block_on(api.ask_follow_up(
                    question,
                    problem.as_ref(),
                    previous.as_ref(),
                ));
                Ok(format_follow_up(answer.as_ref(), format))
            }
            Commands::Config { command } => self.handle_config(command),
        }
    }

    fn audio_source(&self, path: &Path, mime_type: Option<&str>) -> Result<AudioSource, WingmanError> {
        match mime_type {
            None => Ok(AudioSource::File {
                path: path.to_path_buf(),
            }),
            Some(mime) => {
                let part = self
                    .runtime
                    .block_on(MediaPart::from_file(path, DEFAULT_AUDIO_MIME))?;
                Ok(AudioSource::Inline {
                    data: part.data,
                    mime_type: mime.to_string(),
                })
            }
        }
    }

    fn handle_solve(&self, images: &[PathBuf], format: &str) -> Result<String, WingmanError> {
        let api = self.api()?;
        let (problem, solution) = self.runtime.block_on(async {
            let problem = api.extract_problem(images).await?;
            let solution = api.generate_solution(&problem).await?;
            Ok::<_, WingmanError>((problem, solution))
        })?;
        if format == "json" {
            let out = serde_json::json!({ "problem": problem, "solution": solution });
            return Ok(serde_json::to_string_pretty(&out).unwrap_or_else(|_| "{}".to_string()));
        }
        Ok(format!(
            "{}\n{}",
            format_problem(&problem, format),
            format_solution(&solution, format)
        ))
    }

    fn handle_config(&self, command: &ConfigCommands) -> Result<String, WingmanError> {
        match command {
            ConfigCommands::Show => {
                let mut shown = self.config.clone();
                if shown.provider.api_key.is_some() {
                    shown.provider.api_key = Some("********".to_string());
                }
                let source = match &self.config_path {
                    Some(path) => format!("# source: {}\n", path.display()),
                    None => format!("# workspace: {}\n", self.workspace_root.display()),
                };
                let body = toml::to_string_pretty(&shown)
                    .map_err(|e| WingmanError::Config(format!("Failed to render config: {}", e)))?;
                Ok(format!("{}{}", source, body))
            }
            ConfigCommands::Validate => Ok(format_config_validation(&self.config.validate())),
        }
    }

    /// Interactive loop over one long-lived API instance.
    fn handle_session(&self) -> Result<String, WingmanError> {
        use dialoguer::{Input, Select};

        const ACTIONS: &[&str] = &[
            "Capture screenshot",
            "List captures",
            "Switch view",
            "Delete capture",
            "Extract problem from queue",
            "Solve problem",
            "Debug with solution captures",
            "Ask follow-up",
            "Describe image",
            "Set operator override",
            "Reset captures",
            "Quit",
        ];

        let api = self.api()?;
        let mut problem: Option<ProblemContext> = None;
        let mut solution: Option<SolutionContext> = None;
        info!("Interactive session started");

        loop {
            let prompt = format!("[{} | {}]", api.get_view(), api.phase());
            let choice = Select::new()
                .with_prompt(prompt)
                .items(ACTIONS)
                .default(0)
                .interact()
                .map_err(input_error)?;

            let outcome: Result<String, WingmanError> = match choice {
                0 => self
                    .runtime
                    .block_on(api.capture_screen())
                    .map(|entry| format!("Captured {}", entry.path.display())),
                1 => {
                    let view = api.get_view();
                    let paths = self.runtime.block_on(api.store().list(view));
                    Ok(format_captures(view, &paths, "text"))
                }
                2 => {
                    let next = match api.get_view() {
                        View::Queue => View::Solutions,
                        View::Solutions => View::Queue,
                    };
                    api.set_view(next);
                    Ok(format!("View: {}", next))
                }
                3 => {
                    let path: String = Input::new()
                        .with_prompt("Path to delete")
                        .interact_text()
                        .map_err(input_error)?;
                    let outcome = self.runtime.block_on(api.delete_capture(Path::new(path.trim())));
                    Ok(match outcome.error {
                        None => "Deleted.".to_string(),
                        Some(e) => format!("Delete failed: {}", e),
                    })
                }
                4 => self
                    .runtime
                    .block_on(api.extract_problem_from_queue())
                    .map(|p| {
                        let out = format_problem(&p, "text");
                        problem = Some(p);
                        solution = None;
                        out
                    }),
                5 => match &problem {
                    None => Ok("Extract a problem first.".to_string()),
                    Some(p) => self.runtime.block_on(api.generate_solution(p)).map(|s| {
                        let out = format_solution(&s, "text");
                        solution = Some(s);
                        out
                    }),
                },
                6 => match (
                    problem.as_ref(),
                    solution.as_ref().map(|s| s.solution.code.clone()),
                ) {
                    (Some(p), Some(current)) => self
                        .runtime
                        .block_on(api.debug_solution_from_queue(p, &current))
                        .map(|s| {
                            let out = format_solution(&s, "text");
                            solution = Some(s);
                            out
                        }),
                    _ => Ok("Solve a problem first.".to_string()),
                },
                7 => {
                    let question: String = Input::new()
                        .with_prompt("Question")
                        .interact_text()
                        .map_err(input_error)?;
                    let prior_problem = problem.clone().map(PriorProblem::from);
                    let prior = solution.clone().map(PriorContext::from);
                    let answer = self.runtime.block_on(api.ask_follow_up(
                        &question,
                        prior_problem.as_ref(),
                        prior.as_ref(),
                    ));
                    Ok(format_follow_up(answer.as_ref(), "text"))
                }
                8 => {
                    let path: String = Input::new()
                        .with_prompt("Image path")
                        .interact_text()
                        .map_err(input_error)?;
                    self.runtime
                        .block_on(api.describe_image(Path::new(path.trim())))
                        .map(|d| format_description(&d, "text"))
                }
                9 => {
                    let text: String = Input::new()
                        .with_prompt("Operator override (empty clears)")
                        .allow_empty(true)
                        .interact_text()
                        .map_err(input_error)?;
                    api.set_operator_override(&text);
                    Ok("Override updated.".to_string())
                }
                10 => {
                    self.runtime.block_on(api.reset_captures());
                    problem = None;
                    solution = None;
                    Ok("Captures reset.".to_string())
                }
                _ => break,
            };

            match outcome {
                Ok(out) => println!("{}\n", out),
                Err(e) => eprintln!("{}\n", map_error(&e)),
            }
        }

        Ok("Session ended.".to_string())
    }
}

fn input_error(e: dialoguer::Error) -> WingmanError {
    WingmanError::Config(format!("Failed to get user input: {}", e))
}
