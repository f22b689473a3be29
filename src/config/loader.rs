//! Configuration loading.
//!
//! A TOML file merged with `PAIGE_`-prefixed environment variables;
//! the environment wins. Double underscores separate nesting levels, so
//! `PAIGE_SEARCH__MATCH_RATIO=75` overrides `[search] match_ratio`.

use std::path::Path;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use thiserror::Error;

use super::types::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(String),
    #[error("failed to parse config: {0}")]
    ParseError(String),
}

/// Load configuration from a TOML file plus the environment.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("PAIGE_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Parse configuration from a TOML string, without the environment.
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
