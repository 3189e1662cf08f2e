// Configuration from an optional TOML file with environment variable overrides.

use anyhow::{Context, Result};
use chat_actions_price::PriceSettings;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "chat-server.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
    pub price: PriceSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind: String,
    /// Fallback log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Which built-in action providers get registered at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub search: bool,
    pub price: bool,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            search: true,
            price: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    /// Load `path` if given (defaults otherwise), then apply environment overrides.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Find config file in standard locations
    /// Searches: $CHAT_SERVER_CONFIG, ./chat-server.toml
    pub fn find_config_file() -> Option<PathBuf> {
        if let Ok(env_path) = std::env::var("CHAT_SERVER_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                return Some(path);
            }
        }

        std::env::current_dir()
            .ok()
            .map(|dir| dir.join(DEFAULT_CONFIG_FILE))
            .filter(|path| path.exists())
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("CHAT_SERVER_BIND") {
            self.server.bind = val;
        }
        if let Some(val) = lookup("CHAT_SERVER_LOG") {
            self.server.log_level = val;
        }
        if let Some(val) = lookup("PRICE_API_URL") {
            self.price.api_url = val;
        }
        if let Some(val) = lookup("PRICE_API_KEY").filter(|v| !v.is_empty()) {
            self.price.api_key = Some(val);
        }
    }
}
