//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::NomenConfig;
use std::path::Path;

/// The configuration file name looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "nomen.toml";

/// Loads and validates `<project_dir>/nomen.toml`.
pub fn load_config(project_dir: &Path) -> Result<NomenConfig, ConfigError> {
    let path = project_dir.join(CONFIG_FILE_NAME);
    let content =
        std::fs::read_to_string(&path).map_err(|source| ConfigError::Read { path, source })?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<NomenConfig, ConfigError> {
    let config: NomenConfig = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &NomenConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name"));
    }
    if config.project.snapshot.is_empty() {
        return Err(ConfigError::MissingField("project.snapshot"));
    }
    if let Some(rule) = config
        .lint
        .deny
        .iter()
        .find(|rule| config.lint.allow.contains(rule))
    {
        return Err(ConfigError::ConflictingRule(rule.clone()));
    }
    Ok(())
}
