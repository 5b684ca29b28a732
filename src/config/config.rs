use acr_nema::{AcrError, DecodeOptions, DumpOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::LoggingConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error reading config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid log level '{0}'")]
    InvalidLogLevel(String),

    #[error("Log file path must not be empty when logging to a file")]
    MissingLogFile,

    #[error(transparent)]
    Invalid(#[from] AcrError),
}

/// Settings file for the dump tool; command-line flags take precedence
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub decode: DecodeOptions,
    #[serde(default)]
    pub dump: DumpOptions,
}

impl Config {
    /// Read and validate a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Config file if one was given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.log_level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.logging.log_level.clone()));
        }
        if self.logging.log_to_file && self.logging.log_file_path.trim().is_empty() {
            return Err(ConfigError::MissingLogFile);
        }
        self.decode.validate()?;
        self.dump.validate()?;
        Ok(())
    }
}
