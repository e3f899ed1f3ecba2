//! Per-workspace overrides for a Wingman install.
//!
//! A workspace may carry `config/config.toml` for shared settings (provider, capture
//! capacity, persona) and `config/<env>.toml` layered on top, where `<env>` comes from
//! `WINGMAN_ENV`. Files that do not exist are skipped.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};

/// Selects the environment-specific file.
pub const ENV_VAR: &str = "WINGMAN_ENV";
const DEFAULT_ENV: &str = "development";

fn env_name() -> String {
    std::env::var(ENV_VAR)
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENV.to_string())
}

/// Existing workspace files, lowest precedence first.
pub fn layered_files(workspace_root: &Path, env: &str) -> Vec<PathBuf> {
    let config_dir = workspace_root.join("config");
    [
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env)),
    ]
    .into_iter()
    .filter(|path| path.is_file())
    .collect()
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = layered_files(workspace_root, &env_name())
        .into_iter()
        .fold(builder, |builder, path| builder.add_source(File::from(path)));
    Ok(builder)
}
