//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable that overrides the configured desktop server URL.
///
/// Mirrors the variable the chat front-end uses, so one setting covers both.
pub const DESKTOP_SERVER_URL_ENV: &str = "DESKTOP_SERVER_URL";

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Base URL of the desktop automation server.
    #[serde(default = "default_desktop_server_url")]
    pub desktop_server_url: String,

    /// Per-request timeout in seconds for desktop server calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            _schema: None,
            _comment: None,
            desktop_server_url: default_desktop_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Applies environment variable overrides.
    ///
    /// `DESKTOP_SERVER_URL` beats the file value when set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(DESKTOP_SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                self.desktop_server_url = url.trim().to_string();
            }
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.desktop_server_url.starts_with("http://")
            && !self.desktop_server_url.starts_with("https://")
        {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "desktop_server_url must start with http:// or https://, got '{}'",
                    self.desktop_server_url
                ),
            });
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError {
                message: "request_timeout_secs must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

fn default_desktop_server_url() -> String {
    // Port 8000 is the documented default; anything else is configuration.
    "http://127.0.0.1:8000".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.desktop_server_url, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "desktop_server_url": "http://cad-host:8765",
            "request_timeout_secs": 120,
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.desktop_server_url, "http://cad-host:8765");
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn reject_non_http_url() {
        let json = r#"{ "desktop_server_url": "ftp://cad-host" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_zero_timeout() {
        let json = r#"{ "request_timeout_secs": 0 }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{ "unknown_field": "value" }"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn defaults_match_parsed_empty() {
        let parsed: Config = serde_json::from_str("{}").unwrap();
        let defaulted = Config::default();
        assert_eq!(parsed.desktop_server_url, defaulted.desktop_server_url);
        assert_eq!(parsed.request_timeout_secs, defaulted.request_timeout_secs);
        assert_eq!(parsed.logging.level, defaulted.logging.level);
    }
}
