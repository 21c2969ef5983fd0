//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{
    LogFormat, RelayConfig, AUTHENTICATION_URL_ENV, BIND_ADDRESS_ENV, LOG_FORMAT_ENV,
    LOG_LEVEL_ENV,
};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A validated configuration plus any settings that were ignored while
/// loading it. Warnings are reported once logging is up.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: RelayConfig,
    pub warnings: Vec<String>,
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then the `--bind` flag, and validate the result.
pub fn load_config(
    path: Option<&Path>,
    bind_override: Option<String>,
) -> Result<LoadedConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => RelayConfig::default(),
    };

    let warnings = apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    if let Some(bind) = bind_override {
        config.listener.bind_address = bind;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(LoadedConfig { config, warnings })
}

/// Overlay values looked up by environment variable name.
///
/// Empty values are treated as unset. An unknown log format is ignored, the
/// configured one is kept, and a warning is returned for it.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut warnings = Vec::new();

    if let Some(url) = lookup(AUTHENTICATION_URL_ENV) {
        config.upstream.authentication_url = Some(url);
    }
    if let Some(level) = lookup(LOG_LEVEL_ENV) {
        config.observability.log_level = level;
    }
    if let Some(raw) = lookup(LOG_FORMAT_ENV) {
        match LogFormat::parse(&raw) {
            Some(format) => config.observability.log_format = format,
            None => warnings.push(format!("ignoring unknown {}={}", LOG_FORMAT_ENV, raw)),
        }
    }
    if let Some(addr) = lookup(BIND_ADDRESS_ENV) {
        config.listener.bind_address = addr;
    }

    warnings
}
