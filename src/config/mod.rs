//! Configuration file loading and parsing.
//!
//! This module handles loading the configuration file from disk and parsing
//! it into validated, type-safe structures.
//!
//! # Configuration File Locations
//!
//! The configuration file is searched in the following order:
//!
//! 1. Path given as the first CLI argument
//! 2. Default location:
//!    - **Linux/macOS:** `~/.desktop-cad-mcp/config.json`
//!    - **Windows:** `%USERPROFILE%\.desktop-cad-mcp\config.json`
//!
//! When neither exists the built-in defaults apply, so a config file is only
//! needed to point at a non-local desktop server or tune timeouts. In all
//! cases the `DESKTOP_SERVER_URL` environment variable overrides the file.

mod settings;

pub use settings::{Config, LoggingConfig, DESKTOP_SERVER_URL_ENV};

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Returns the default configuration directory.
///
/// - **Linux/macOS:** `~/.desktop-cad-mcp/`
/// - **Windows:** `%USERPROFILE%\.desktop-cad-mcp\`
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".desktop-cad-mcp"))
}

/// Returns the platform-specific default configuration file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    default_config_dir().map(|p| p.join("config.json"))
}

/// Loads and parses the configuration file.
///
/// If `path` is `None` and no file exists at the default location, built-in
/// defaults are used. An explicitly supplied path must exist.
/// Environment overrides are applied after parsing, before validation.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly supplied configuration file cannot be found
/// - The file cannot be read
/// - The JSON is malformed
/// - Validation fails (bad URL scheme, zero timeout)
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) if p.exists() => p,
            _ => return finalise(Config::default()),
        },
    };

    if !config_path.exists() {
        return Err(ConfigError::NotFound { path: config_path });
    }

    let contents = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;

    let config: Config = serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: config_path.clone(),
        source: e,
    })?;

    finalise(config)
}

/// Applies environment overrides and validates.
fn finalise(mut config: Config) -> Result<Config, ConfigError> {
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}
