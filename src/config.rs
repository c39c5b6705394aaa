use serde::{Deserialize, Serialize, de::DeserializeOwned};

use std::{env, fs, path::Path, time::Duration};

use crate::lookup::DEFAULT_LOOKUP_TIMEOUT;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error(
        "config file not found and environment variables are incomplete. \
         Tried: '{path}', 'config.yaml' and environment variables. Error: {source}"
    )]
    Env { path: String, source: envy::Error },

    #[error("required setting '{0}' is empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotebookServiceConfig {
    pub database_dsn: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteServiceConfig {
    pub database_dsn: String,
    pub port: u16,
    /// Base address of the notebook service, e.g. `http://notebooks:3000`
    pub notebook_service_url: String,
    #[serde(with = "humantime_serde", default = "default_lookup_timeout")]
    pub lookup_timeout: Duration,
}

const fn default_lookup_timeout() -> Duration {
    DEFAULT_LOOKUP_TIMEOUT
}

/// Settings every service needs before it may start.
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

impl Validate for NotebookServiceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require("database_dsn", &self.database_dsn)
    }
}

impl Validate for NoteServiceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        require("database_dsn", &self.database_dsn)?;
        require("notebook_service_url", &self.notebook_service_url)
    }
}

fn require(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::Empty(name))
    } else {
        Ok(())
    }
}

fn read_file<T: DeserializeOwned>(path: &str) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_string(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_string(),
        source,
    })
}

/// Loads config from the YAML file named by `path_var` (default `config.yaml`),
/// falling back to plain environment variables (`DATABASE_DSN`, `PORT`, ...).
pub fn load_config<T>(path_var: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Validate,
{
    let config_path = env::var(path_var).unwrap_or_else(|_| "config.yaml".to_string());
    load_config_from(&config_path)
}

/// Same as [`load_config`] with the config file path already resolved.
pub fn load_config_from<T>(config_path: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Validate,
{
    let config: T = if Path::new(config_path).exists() {
        read_file(config_path)?
    } else if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        read_file("config.yaml")?
    } else {
        tracing::info!(
            "No config file found, attempting to load configuration from environment variables"
        );
        envy::from_env().map_err(|source| ConfigError::Env {
            path: config_path.to_string(),
            source,
        })?
    };

    config.validate()?;
    Ok(config)
}
