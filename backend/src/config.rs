//! Backend configuration, read from YAML.
//!
//! Lookup order: the file named by `PLATFORM_CONFIG`, then `config.yaml` in
//! the working directory, then built-in defaults.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::challenge_calendar::{ChallengeCalendar, CHALLENGE_DURATION_DAYS};
use crate::domain::models::challenge::{ChallengeError, ChallengeThemeDefinition};

pub const CONFIG_ENV_VAR: &str = "PLATFORM_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Top-level backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Address the REST API listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Default log level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory holding profile documents.
    #[serde(default = "default_data_directory")]
    pub data_directory: PathBuf,

    /// Origin allowed to call the API from a browser.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Replacement for the built-in challenge table.
    #[serde(default)]
    pub challenges: Option<ChallengeConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChallengeConfig {
    #[serde(default = "default_duration_days")]
    pub duration_days: i64,
    pub themes: Vec<ChallengeThemeDefinition>,
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_data_directory() -> PathBuf {
    PathBuf::from("data")
}
fn default_cors_origin() -> String {
    "http://localhost:8080".to_string()
}
fn default_duration_days() -> i64 {
    CHALLENGE_DURATION_DAYS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            log_level: default_log_level(),
            data_directory: default_data_directory(),
            cors_origin: default_cors_origin(),
            challenges: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid bind address '{0}'")]
    InvalidBindAddress(String),
    #[error("Invalid challenge calendar: {0}")]
    Challenge(#[from] ChallengeError),
}

impl AppConfig {
    /// Load and validate configuration from the usual locations
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_file(path),
            Err(_) => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        self.challenge_calendar()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(self.bind_address.clone()))
    }

    /// The configured challenge calendar, or the built-in one
    pub fn challenge_calendar(&self) -> Result<ChallengeCalendar, ConfigError> {
        match &self.challenges {
            Some(challenges) => Ok(ChallengeCalendar::from_definitions(
                challenges.themes.clone(),
                challenges.duration_days,
            )?),
            None => Ok(ChallengeCalendar::new()),
        }
    }
}
