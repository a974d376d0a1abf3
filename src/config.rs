use crate::constants::{APP_NAME, DEFAULT_ENDPOINT, ENDPOINT_ENV, LOG_LEVEL_ENV};
use crate::errors::{ChatError, ChatResult};
use log::LevelFilter;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Directory the log file is written to.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(env::temp_dir)
                .join(APP_NAME)
        })
    }
}

/// Loads `.env`, the config file (writing a default one on first run) and
/// environment overrides, then validates the result.
pub fn initialize_config() -> ChatResult<Config> {
    dotenv::dotenv().ok();

    let config_path = get_config_path()?;
    let mut config = load_or_create(&config_path)?;
    apply_overrides(
        &mut config,
        env::var(ENDPOINT_ENV).ok(),
        env::var(LOG_LEVEL_ENV).ok(),
    );
    validate_config(&config)?;

    Ok(config)
}

pub fn load_or_create(config_path: &Path) -> ChatResult<Config> {
    if config_path.exists() {
        let config_str = fs::read_to_string(config_path)
            .map_err(|e| ChatError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| ChatError::config_error(format!("Failed to parse config: {}", e)))?;

        validate_config(&config)?;
        return Ok(config);
    }

    let config = Config::default();

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ChatError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }

    let config_str = serde_json::to_string_pretty(&config)?;
    fs::write(config_path, config_str)
        .map_err(|e| ChatError::config_error(format!("Failed to write config file: {}", e)))?;

    Ok(config)
}

pub fn apply_overrides(config: &mut Config, endpoint: Option<String>, log_level: Option<String>) {
    if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
        config.endpoint = endpoint.trim().to_string();
    }
    if let Some(level) = log_level.filter(|l| !l.trim().is_empty()) {
        config.log_level = level.trim().to_string();
    }
}

fn get_config_path() -> ChatResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ChatError::config_error("Could not determine config directory"))?;

    Ok(config_dir.join(APP_NAME).join("config.json"))
}

pub fn validate_config(config: &Config) -> ChatResult<()> {
    let url = Url::parse(&config.endpoint).map_err(|e| {
        ChatError::config_error(format!("Invalid endpoint '{}': {}", config.endpoint, e))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ChatError::config_error(format!(
            "Endpoint must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if LevelFilter::from_str(&config.log_level).is_err() {
        return Err(ChatError::config_error(format!(
            "Unknown log level '{}'",
            config.log_level
        )));
    }

    Ok(())
}
