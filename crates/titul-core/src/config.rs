//! Configuration management.
//!
//! Loads configuration from ${TITUL_HOME}/config.toml with sensible defaults.

use std::fs;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default backend base URL. The four endpoints hang off this:
/// `{base}/auth`, `{base}/api`, `{base}/chat`, `{base}/admin`.
pub const DEFAULT_BASE_URL: &str = "https://functions.chikentitul.example";

/// Default chat history window requested from the server.
pub const DEFAULT_CHAT_LIMIT: u32 = 50;

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL for the backend functions.
    pub base_url: String,
    /// How many chat messages to request per poll.
    pub chat_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_limit: DEFAULT_CHAT_LIMIT,
        }
    }
}

impl Config {
    /// Loads config from ${TITUL_HOME}/config.toml.
    ///
    /// Missing file yields defaults; missing keys fall back per-field.
    pub fn load() -> Result<Self> {
        let path = paths::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Writes the default config file if none exists. Returns true if written.
    pub fn init_default() -> Result<bool> {
        let path = paths::config_path();
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content =
            toml::to_string_pretty(&Config::default()).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(true)
    }
}

pub mod paths {
    //! Path resolution for configuration and data files.
    //!
    //! TITUL_HOME resolution order:
    //! 1. TITUL_HOME environment variable (if set)
    //! 2. ~/.config/titul (default)

    use std::path::PathBuf;

    /// Returns the titul home directory.
    pub fn titul_home() -> PathBuf {
        if let Ok(home) = std::env::var("TITUL_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("titul"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        titul_home().join("config.toml")
    }

    /// Returns the path to the persisted session record.
    pub fn session_path() -> PathBuf {
        titul_home().join("session.json")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        titul_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let config: Config = toml::from_str("base_url = \"http://localhost:9000\"").unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.chat_limit, DEFAULT_CHAT_LIMIT);
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config {
            base_url: "http://127.0.0.1:1234".to_string(),
            chat_limit: 25,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
