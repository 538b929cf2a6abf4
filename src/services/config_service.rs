use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use super::file_service::get_app_data_dir;
use super::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::error::ConfigError;

/// Where chat context is kept between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatContinuity {
    /// A conversation object holds the turns.
    #[default]
    Remote,
    /// The session resends its own history with every message.
    Local,
}

impl ChatContinuity {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "remote" => Some(Self::Remote),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub chat_continuity: ChatContinuity,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            chat_continuity: ChatContinuity::default(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

fn get_config_path() -> Result<PathBuf, ConfigError> {
    Ok(get_app_data_dir()?.join("config.json"))
}

pub fn read_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn write_config_file(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

/// Apply environment overrides. `lookup` stands in for `std::env::var`.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")) {
        config.api_key = Some(key);
    }
    if let Some(model) = non_empty("DOCBRIEF_MODEL") {
        config.model = model;
    }
    if let Some(url) = non_empty("DOCBRIEF_BASE_URL") {
        config.base_url = url;
    }
    if let Some(continuity) = non_empty("DOCBRIEF_CHAT_CONTINUITY").and_then(|v| ChatContinuity::parse(&v)) {
        config.chat_continuity = continuity;
    }
    if let Some(secs) = non_empty("DOCBRIEF_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()) {
        config.request_timeout_secs = secs;
    }
}

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.model.trim().is_empty() {
        return Err(ConfigError::Invalid("model cannot be empty".into()));
    }
    if config.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("base URL cannot be empty".into()));
    }
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Invalid("request timeout must be >= 1 second".into()));
    }
    Ok(())
}

/// Defaults, then `config.json` in the app data dir, then the environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = read_config_file(&get_config_path()?)?;
    apply_env_overrides(&mut config, |var| env::var(var).ok());
    validate(&config)?;
    Ok(config)
}

/// Read, change and write back `config.json`. A file that fails to parse is
/// left untouched and the error is returned.
pub fn update_config_file<F>(path: &Path, change: F) -> Result<AppConfig, ConfigError>
where
    F: FnOnce(&mut AppConfig),
{
    let mut config = read_config_file(path)?;
    change(&mut config);
    validate(&config)?;
    write_config_file(path, &config)?;
    Ok(config)
}

pub fn set_api_key(key: &str) -> Result<(), ConfigError> {
    update_config_file(&get_config_path()?, |config| config.api_key = Some(key.to_string()))?;
    Ok(())
}

pub fn set_model(model: &str) -> Result<(), ConfigError> {
    update_config_file(&get_config_path()?, |config| config.model = model.to_string())?;
    Ok(())
}
