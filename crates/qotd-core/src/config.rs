//! Configuration management for QOTD.
//!
//! Loads configuration from ${QOTD_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for QOTD configuration and data directories.
    //!
    //! QOTD_HOME resolution order:
    //! 1. QOTD_HOME environment variable (if set)
    //! 2. ~/.config/qotd (default)

    use std::path::PathBuf;

    /// Returns the QOTD home directory.
    ///
    /// Checks QOTD_HOME env var first, falls back to ~/.config/qotd
    pub fn qotd_home() -> PathBuf {
        if let Ok(home) = std::env::var("QOTD_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("qotd"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        qotd_home().join("config.toml")
    }

    /// Returns the path to the persisted credential file.
    pub fn credentials_path() -> PathBuf {
        qotd_home().join("credentials.json")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        qotd_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the quote service.
    pub base_url: String,

    /// HTTP request timeout in seconds (0 disables).
    pub request_timeout_secs: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:8000";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 10;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Resolves the effective base URL with precedence: env > config.
    /// Validates that the URL is well-formed.
    ///
    /// `QOTD_BASE_URL` overrides the configured value when set and non-empty.
    pub fn resolve_base_url(&self) -> Result<String> {
        if let Ok(env_url) = std::env::var("QOTD_BASE_URL") {
            let trimmed = env_url.trim();
            if !trimmed.is_empty() {
                validate_url(trimmed)?;
                return Ok(trimmed.to_string());
            }
        }

        let trimmed = self.base_url.trim();
        validate_url(trimmed)?;
        Ok(trimmed.to_string())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid base URL: {url}"))?;
    Ok(())
}

/// Returns the default config file template with commented defaults.
pub fn default_config_template() -> &'static str {
    r#"# QOTD configuration

# Base URL of the quote service.
base_url = "http://localhost:8000"

# HTTP request timeout in seconds (0 disables).
# request_timeout_secs = 10
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"http://example.test:9000\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://example.test:9000");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [not toml").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config.base_url, Config::default().base_url);
    }

    #[test]
    fn test_request_timeout_zero_disables() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.request_timeout().is_none());
    }
}
