//! Configuration management for brevo

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::assistant::localize::DEFAULT_LOCALE_KEYWORDS;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub localization: LocalizationConfig,
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

/// Where the agent query service lives and how long we wait for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocalizationConfig {
    pub enabled: bool,
    /// Symbol written in place of `$` for matching replies
    pub symbol: String,
    /// Utterance substrings (lowercase) that select the local currency
    pub keywords: Vec<String>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            symbol: "₹".to_string(),
            keywords: DEFAULT_LOCALE_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolsConfig {
    /// Tool names to register; endpoints for anything else serve simulated data
    pub enabled: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enabled: ["weather", "currency", "expenses", "places"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeout_secs: 10,
        }
    }
}

/// Problems found while validating a loaded configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid backend URL '{url}': {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    #[error("{0} timeout must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("Localization symbol must not be empty")]
    EmptySymbol,
}

impl Config {
    /// Load configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "brevo") {
            Ok(proj_dirs.config_dir().join("config.toml"))
        } else {
            Ok(PathBuf::from("config.toml"))
        }
    }

    /// Save configuration to the given path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if let Err(e) = url::Url::parse(&self.backend.url) {
            return Err(ConfigError::InvalidBackendUrl {
                url: self.backend.url.clone(),
                reason: e.to_string(),
            });
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("Backend"));
        }
        if self.tools.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("Tool"));
        }
        if self.localization.symbol.is_empty() {
            return Err(ConfigError::EmptySymbol);
        }
        Ok(())
    }
}
