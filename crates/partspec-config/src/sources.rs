// Configuration source loading
//
// Priority order:
// 1. Environment variables (PARTSPEC_* prefix)
// 2. Config file path from PARTSPEC_CONFIG
// 3. Default config file (./partspec.toml)
// 4. Built-in defaults

use crate::env_overrides::{apply_env_overrides, StdEnvSource};
use crate::RuntimeConfig;
use anyhow::{Context, Result};
use std::env;
use std::path::Path;

/// Load configuration from the standard sources.
pub fn load_config() -> Result<RuntimeConfig> {
    let mut config = match find_config_file()? {
        Some(config) => config,
        None => RuntimeConfig::default(),
    };

    apply_env_overrides(&mut config, &StdEnvSource)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a specific file path (for the --config flag).
/// Environment overrides still apply on top of the file contents.
pub fn load_from_file_path(path: impl AsRef<Path>) -> Result<RuntimeConfig> {
    let mut config = read_config_file(path.as_ref())?;
    apply_env_overrides(&mut config, &StdEnvSource)?;
    config.validate()?;
    Ok(config)
}

fn find_config_file() -> Result<Option<RuntimeConfig>> {
    if let Ok(path) = env::var("PARTSPEC_CONFIG") {
        return read_config_file(Path::new(&path)).map(Some);
    }

    let default_path = Path::new("./partspec.toml");
    if default_path.exists() {
        return read_config_file(default_path).map(Some);
    }

    Ok(None)
}

fn read_config_file(path: &Path) -> Result<RuntimeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
