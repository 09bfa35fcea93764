use crate::constants::{
    API_KEY_ENV, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
    GEMINI_API_URL,
};
use crate::errors::{FolioError, FolioResult};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub request_timeout_secs: u64,
    /// Profile JSON to load instead of the bundled one.
    pub profile_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_URL.to_string(),
            temperature: 0.7,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            profile_path: None,
            log_level: "info".to_string(),
        }
    }
}

/// Loads the config from the default location, creating it on first run.
pub fn load_config() -> FolioResult<Config> {
    let config_path = get_config_path()?;
    load_config_from(&config_path)
}

/// Loads the config at `path`; `GEMINI_API_KEY` overrides the stored key.
pub fn load_config_from(path: &Path) -> FolioResult<Config> {
    load_config_with(path, env::var(API_KEY_ENV).ok())
}

fn load_config_with(path: &Path, env_key: Option<String>) -> FolioResult<Config> {
    let mut config = if path.exists() {
        let config_str = fs::read_to_string(path)
            .map_err(|e| FolioError::config_error(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str::<Config>(&config_str)
            .map_err(|e| FolioError::config_error(format!("Failed to parse config: {}", e)))?
    } else {
        info!("No config found, writing defaults to {}", path.display());
        let config = Config::default();
        save_config(path, &config)?;
        config
    };

    if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
        debug!("Using API key from {}", API_KEY_ENV);
        config.api_key = key;
    }

    validate_config(&config)?;
    Ok(config)
}

/// Writes `config` as pretty JSON, creating parent directories.
pub fn save_config(path: &Path, config: &Config) -> FolioResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FolioError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }

    let config_str = serde_json::to_string_pretty(config)
        .map_err(|e| FolioError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(path, config_str)
        .map_err(|e| FolioError::config_error(format!("Failed to write config file: {}", e)))?;

    Ok(())
}

pub fn get_config_path() -> FolioResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| FolioError::config_error("Could not determine config directory"))?;

    Ok(config_dir.join("folio").join("config.json"))
}

pub fn validate_config(config: &Config) -> FolioResult<()> {
    if config.api_key.trim().is_empty() {
        return Err(FolioError::config_error(format!(
            "API key is required (set {} or api_key in the config file)",
            API_KEY_ENV
        )));
    }

    if config.model.trim().is_empty() {
        return Err(FolioError::config_error("Model name is required"));
    }

    if config.base_url.trim().is_empty() {
        return Err(FolioError::config_error("base_url is required"));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(FolioError::config_error(
            "Temperature must be between 0.0 and 2.0",
        ));
    }

    if config.max_output_tokens == 0 {
        return Err(FolioError::config_error(
            "max_output_tokens must be greater than 0",
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(FolioError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    Ok(())
}
