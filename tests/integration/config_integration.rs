//! Integration tests for the configuration system

use super::test_utils::with_env;
use std::sync::Arc;
use tempfile::TempDir;
use wingman::capture::{NoopVisibility, View};
use wingman::config::{ConfigLoader, ProviderType, WingmanConfig};
use wingman::WingmanApi;

#[test]
fn test_environment_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("wingman.toml");
    std::fs::write(
        &config_file,
        r#"
[provider]
provider_type = "ollama"
model = "llava"

[capture]
capacity = 2
"#,
    )
    .unwrap();

    let config = with_env(&[("WINGMAN__CAPTURE__CAPACITY", Some("7"))], || {
        ConfigLoader::load_from_file(&config_file).unwrap()
    });
    assert_eq!(config.provider.provider_type, ProviderType::Ollama);
    assert_eq!(config.capture.capacity, 7);
    assert!(config.validate().is_ok());
}

#[test]
fn test_environment_specific_workspace_file() {
    let temp_dir = TempDir::new().unwrap();
    let home = temp_dir.path().join("home");
    std::fs::create_dir_all(&home).unwrap();
    let config_dir = temp_dir.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "[capture]\ncapacity = 3\n").unwrap();
    std::fs::write(config_dir.join("ci.toml"), "[capture]\ncapacity = 1\n").unwrap();

    let home_str = home.to_string_lossy().to_string();
    let config = with_env(
        &[
            ("HOME", Some(home_str.as_str())),
            ("XDG_CONFIG_HOME", None),
            ("WINGMAN_ENV", Some("ci")),
        ],
        || ConfigLoader::load(temp_dir.path()).unwrap(),
    );
    assert_eq!(config.capture.capacity, 1);
}

#[test]
fn test_gemini_without_key_cannot_build_api() {
    let result = with_env(&[("GEMINI_API_KEY", None)], || {
        WingmanApi::from_config(&WingmanConfig::default(), Arc::new(NoopVisibility))
    });
    assert!(matches!(result, Err(wingman::WingmanError::Config(_))));
}

#[test]
fn test_api_from_config_uses_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = WingmanConfig::default();
    config.provider.provider_type = ProviderType::Ollama;
    config.provider.model = "llava".to_string();
    config.capture.data_dir = Some(temp_dir.path().to_path_buf());

    let api = WingmanApi::from_config(&config, Arc::new(NoopVisibility)).unwrap();
    assert_eq!(api.store().root(), temp_dir.path());
    assert_eq!(api.get_view(), View::Queue);
}
