//! Application configuration.
//!
//! Read from `stage_tagger.toml` in the working directory, or from the file
//! named by `STAGE_TAGGER_CONFIG`. A missing file means defaults.
//! `STAGE_TAGGER_ENDPOINT` overrides the suggestion endpoint.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context};
use serde::Deserialize;
use stage_tagger_engine::{SuggestSettings, DEFAULT_ENDPOINT};
use tagger_logging::{LevelFilter, LogDestination};

pub const CONFIG_PATH_ENV: &str = "STAGE_TAGGER_CONFIG";
pub const ENDPOINT_ENV: &str = "STAGE_TAGGER_ENDPOINT";
const DEFAULT_CONFIG_FILE: &str = "stage_tagger.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub suggestion: SuggestionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub endpoint: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub destination: LogDestination,
    pub level: String,
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            destination: LogDestination::File,
            level: "info".to_string(),
            file: PathBuf::from(tagger_logging::DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Loads the config the way the binary does: file location and endpoint
    /// override come from the environment.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let mut config = Self::load_from(&path)?;
        config.apply_endpoint_override(std::env::var(ENDPOINT_ENV).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()));
            }
        };
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn apply_endpoint_override(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|value| !value.trim().is_empty()) {
            self.suggestion.endpoint = endpoint;
        }
    }

    pub fn suggest_settings(&self) -> SuggestSettings {
        SuggestSettings {
            endpoint: self.suggestion.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.suggestion.connect_timeout_secs),
            request_timeout: self.suggestion.request_timeout_secs.map(Duration::from_secs),
        }
    }

    pub fn log_level(&self) -> anyhow::Result<LevelFilter> {
        LevelFilter::from_str(&self.logging.level)
            .map_err(|_| anyhow!("unknown log level {:?}", self.logging.level))
    }
}
