//! Configuration management
//!
//! This module handles loading, validation, and management of the Steward
//! configuration. Configuration is stored in TOML format at
//! ~/.steward/config.toml.
//!
//! # Configuration Sections
//!
//! - **core**: Log level
//! - **server**: HTTP bind address and port
//! - **llm**: Planner LLM provider settings
//! - **tools**: Upstream tool endpoint URLs and Trello credentials
//!
//! Credentials and endpoint URLs can also be supplied through environment
//! variables (`OPENAI_API_KEY`, `PROPERTY_URL`, `CHART_URL`,
//! `PROPERTY_API_BASE`, `TRELLO_KEY`, `TRELLO_TOKEN`, `TRELLO_LIST_ID`,
//! `PORT`), which override the file contents. The loaded config is passed
//! explicitly into the provider and transport constructors; core logic never
//! reads the environment directly.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or writing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to write config file: {0}")]
    Write(String),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Main configuration structure
///
/// Represents the complete Steward configuration loaded from
/// ~/.steward/config.toml. Every section has serde defaults so a partial
/// file (or none at all) still yields a usable config.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Core settings
    #[serde(default)]
    pub core: CoreConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Planner LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Tool endpoint configuration
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Core settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Planner LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LlmConfig {
    /// OpenAI-compatible provider settings
    #[serde(default)]
    pub openai: OpenAiConfig,
}

/// OpenAI-compatible provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Base URL for the chat-completions API
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// API key; usually supplied via the OPENAI_API_KEY env var
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Upstream tool endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Endpoint answering property queries
    #[serde(default = "default_properties_url")]
    pub properties_url: String,

    /// Endpoint fetching records and generating charts
    #[serde(default = "default_chart_url")]
    pub chart_url: String,

    /// Base URL of the property management REST API
    #[serde(default = "default_property_api_base")]
    pub property_api_base: String,

    /// Trello REST credentials
    #[serde(default)]
    pub trello: TrelloConfig,
}

/// Trello REST configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrelloConfig {
    /// Base URL of the Trello REST API
    #[serde(default = "default_trello_base_url")]
    pub base_url: String,

    /// API key; usually supplied via the TRELLO_KEY env var
    #[serde(default)]
    pub key: String,

    /// API token; usually supplied via the TRELLO_TOKEN env var
    #[serde(default)]
    pub token: String,

    /// List the cards are created on
    #[serde(default)]
    pub list_id: String,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9000
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_properties_url() -> String {
    "http://localhost:8000/get_properties".to_string()
}

fn default_chart_url() -> String {
    "http://localhost:8000/get_charts".to_string()
}

fn default_property_api_base() -> String {
    "https://staging-keplerchat-ysa2.encr.app/api/properties".to_string()
}

fn default_trello_base_url() -> String {
    "https://api.trello.com/1".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: default_openai_base_url(),
            model: default_openai_model(),
            api_key: None,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            properties_url: default_properties_url(),
            chart_url: default_chart_url(),
            property_api_base: default_property_api_base(),
            trello: TrelloConfig::default(),
        }
    }
}

impl Default for TrelloConfig {
    fn default() -> Self {
        Self {
            base_url: default_trello_base_url(),
            key: String::new(),
            token: String::new(),
            list_id: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default location (~/.steward/config.toml).
    ///
    /// If the configuration file doesn't exist, creates a default one.
    /// Environment overrides are applied after loading.
    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Self::create_default(&config_path)
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;

        let mut config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Create default configuration and save it to `path`.
    fn create_default(path: &Path) -> Result<Self, ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Write(e.to_string()))?;
        }

        let mut config = Config::default();

        let toml_string =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::Write(e.to_string()))?;
        fs::write(path, toml_string).map_err(|e| ConfigError::Write(e.to_string()))?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Get the default configuration file path (~/.steward/config.toml)
    fn default_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".steward").join("config.toml"))
    }

    /// Apply environment variable overrides for credentials, endpoint URLs,
    /// and the listen port. Unset variables leave the file values in place.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.llm.openai.api_key = Some(key);
        }
        if let Ok(url) = std::env::var("PROPERTY_URL") {
            self.tools.properties_url = url;
        }
        if let Ok(url) = std::env::var("CHART_URL") {
            self.tools.chart_url = url;
        }
        if let Ok(url) = std::env::var("PROPERTY_API_BASE") {
            self.tools.property_api_base = url;
        }
        if let Ok(key) = std::env::var("TRELLO_KEY") {
            self.tools.trello.key = key;
        }
        if let Ok(token) = std::env::var("TRELLO_TOKEN") {
            self.tools.trello.token = token;
        }
        if let Ok(list_id) = std::env::var("TRELLO_LIST_ID") {
            self.tools.trello.list_id = list_id;
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.core.log_level, "info");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.llm.openai.model, "gpt-4.1-mini");
        assert!(config.llm.openai.api_key.is_none());
        assert_eq!(config.tools.trello.base_url, "https://api.trello.com/1");
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 8123

[tools]
properties_url = "http://tools.internal/get_properties"
"#,
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.server.port, 8123);
        assert_eq!(
            config.tools.properties_url,
            "http://tools.internal/get_properties"
        );
        // Unspecified sections fall back to defaults
        assert_eq!(config.core.log_level, "info");
        assert_eq!(config.tools.chart_url, "http://localhost:8000/get_charts");
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server = \"not a table\"").unwrap();

        let result = Config::load_from_path(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.server.host, config.server.host);
        assert_eq!(parsed.llm.openai.base_url, config.llm.openai.base_url);
        assert_eq!(
            parsed.tools.property_api_base,
            config.tools.property_api_base
        );
    }
}
