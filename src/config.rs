//! Configuration System
//!
//! Layered configuration for the provider, capture queues, prompt persona and logging.
//! Sources in precedence order (lowest first): built-in defaults, the global file,
//! workspace files, then `WINGMAN__*` environment variables.

use crate::capture::CaptureConfig;
use crate::error::WingmanError;
use crate::logging::LoggingConfig;
use crate::prompt::PromptConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use crate::provider::{ProviderConfig, ProviderType};

mod merge;
mod sources;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WingmanConfig {
    /// Remote model provider
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Capture queue settings
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Persona and operator override
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Provider(String),
    Capture(String),
    Prompt(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Capture(msg) => write!(f, "Capture: {}", msg),
            ValidationError::Prompt(msg) => write!(f, "Prompt: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl WingmanConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }
        if let Err(e) = self.capture.validate() {
            errors.push(ValidationError::Capture(e));
        }
        if self.prompt.persona.trim().is_empty() {
            errors.push(ValidationError::Prompt("Persona cannot be empty".to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all failures into a single config error.
    pub fn validated(self) -> Result<Self, WingmanError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            WingmanError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(self)
    }
}

/// Loads `WingmanConfig` from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace root.
    pub fn load(workspace_root: &Path) -> Result<WingmanConfig, WingmanError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = builder.add_source(Self::environment());
        let config: WingmanConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Load configuration from one explicit file (plus defaults and environment).
    pub fn load_from_file(path: &Path) -> Result<WingmanConfig, WingmanError> {
        if !path.exists() {
            return Err(WingmanError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config: WingmanConfig = merge::builder_with_defaults()?
            .add_source(::config::File::from(path))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Location of the global config file, if HOME or XDG_CONFIG_HOME is set.
    pub fn xdg_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn default() -> WingmanConfig {
        WingmanConfig::default()
    }

    fn environment() -> ::config::Environment {
        ::config::Environment::with_prefix("WINGMAN")
            .separator("__")
            .try_parsing(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Serializes HOME / XDG_CONFIG_HOME mutation across tests
    static HOME_MUTEX: Mutex<()> = Mutex::new(());

    fn with_home<F, R>(home: &Path, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = HOME_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let original_home = std::env::var("HOME").ok();
        let original_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("HOME", home);
        std::env::remove_var("XDG_CONFIG_HOME");

        let result = f();

        match original_home {
            Some(h) => std::env::set_var("HOME", h),
            None => std::env::remove_var("HOME"),
        }
        if let Some(x) = original_xdg {
            std::env::set_var("XDG_CONFIG_HOME", x);
        }
        result
    }

    #[test]
    fn test_default_config() {
        let config = WingmanConfig::default();
        assert_eq!(config.provider.provider_type, ProviderType::Gemini);
        assert_eq!(config.provider.model, "gemini-2.0-flash");
        assert_eq!(config.capture.capacity, 5);
        assert!(config.prompt.operator_override.is_none());
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let mut config = WingmanConfig::default();
        config.provider.model = String::new();
        config.capture.capacity = 0;
        config.prompt.persona = "  ".to_string();
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("wingman.toml");
        std::fs::write(
            &config_file,
            r#"
[provider]
provider_type = "openai"
model = "gpt-4o"
endpoint = "http://localhost:8080/v1"

[capture]
capacity = 3

[prompt]
operator_override = "Answer in French."
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&config_file).unwrap();
        assert_eq!(config.provider.provider_type, ProviderType::OpenAI);
        assert_eq!(config.provider.model, "gpt-4o");
        assert_eq!(config.provider.request_timeout_secs, 120);
        assert_eq!(config.capture.capacity, 3);
        assert_eq!(
            config.prompt.operator_override.as_deref(),
            Some("Answer in French.")
        );
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigLoader::load_from_file(&temp_dir.path().join("nope.toml"));
        assert!(matches!(result, Err(WingmanError::Config(_))));
    }

    #[test]
    fn test_workspace_config_overrides_global_config() {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().join("home");
        let global_dir = home.join(".config").join("wingman");
        std::fs::create_dir_all(&global_dir).unwrap();
        std::fs::write(
            global_dir.join("config.toml"),
            "[provider]\nmodel = \"global-model\"\n\n[capture]\ncapacity = 4\n",
        )
        .unwrap();

        let workspace = temp_dir.path().join("workspace");
        std::fs::create_dir_all(workspace.join("config")).unwrap();
        std::fs::write(
            workspace.join("config").join("config.toml"),
            "[provider]\nmodel = \"workspace-model\"\n",
        )
        .unwrap();

        let config = with_home(&home, || ConfigLoader::load(&workspace).unwrap());
        assert_eq!(config.provider.model, "workspace-model");
        assert_eq!(config.capture.capacity, 4);
    }

    #[test]
    fn test_load_without_any_files_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().join("empty_home");
        std::fs::create_dir_all(&home).unwrap();
        let config = with_home(&home, || ConfigLoader::load(temp_dir.path()).unwrap());
        assert_eq!(config.provider.model, "gemini-2.0-flash");
        assert_eq!(config.capture.capacity, 5);
    }
}
