//! Configuration loading utilities

use crate::schema::{Config, ConfigFormat};
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use tscat_common::TscatError;

/// Environment variable overriding `catalogs.directory`.
pub const ENV_CATALOG_DIR: &str = "TSCAT_CATALOG_DIR";
/// Environment variable overriding `catalogs.default_language`.
pub const ENV_LANGUAGE: &str = "TSCAT_LANGUAGE";
/// Environment variable overriding `catalogs.watch`.
pub const ENV_WATCH: &str = "TSCAT_WATCH";
/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "TSCAT_LOG_LEVEL";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading or writing a configuration file
    #[error("Failed to access configuration file {}: {source}", .path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to serialize TOML configuration: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// YAML parsing or serialization error
    #[error("Failed to process YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The file extension names no supported format
    #[error("Unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(String),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {reason}")]
    EnvParse {
        /// Variable name
        var: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl From<ConfigError> for TscatError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Configuration loader bound to one file path.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The configuration file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads configuration from the file, with environment overrides.
    ///
    /// A missing file yields the defaults; any other read failure is an
    /// error.
    pub async fn load(&self) -> Result<Config, ConfigError> {
        self.load_with_env(|var| env::var(var).ok()).await
    }

    /// Like [`ConfigLoader::load`], reading overrides through `lookup`
    /// instead of the process environment.
    pub async fn load_with_env<F>(&self, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                debug!("Loading configuration from {:?}", self.path);
                parse_config(&content, self.format()?)?
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No configuration at {:?}, using defaults", self.path);
                Config::default()
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        apply_env_overrides(&mut config, lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the file atomically.
    ///
    /// The document is written next to the target and renamed over it, so
    /// readers never see a half-written file.
    pub async fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;
        let content = serialize_config(config, self.format()?)?;

        let staging = self.path.with_extension("tmp");
        let io_error = |source: io::Error| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        tokio::fs::write(&staging, content).await.map_err(io_error)?;
        tokio::fs::rename(&staging, &self.path).await.map_err(io_error)?;

        info!("Saved configuration to {:?}", self.path);
        Ok(())
    }

    fn format(&self) -> Result<ConfigFormat, ConfigError> {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ConfigFormat::from_extension)
            .ok_or_else(|| ConfigError::UnsupportedFormat(self.path.clone()))
    }
}

/// Parses a configuration document. Missing fields take their defaults.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
    Ok(match format {
        ConfigFormat::Toml => toml::from_str(content)?,
        ConfigFormat::Yaml => serde_yaml::from_str(content)?,
    })
}

/// Serializes a configuration document.
pub fn serialize_config(config: &Config, format: ConfigFormat) -> Result<String, ConfigError> {
    Ok(match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    })
}

/// Applies environment overrides to a configuration.
///
/// An overridden language that is not listed is added to the languages.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(directory) = lookup(ENV_CATALOG_DIR) {
        config.catalogs.directory = PathBuf::from(directory);
    }

    if let Some(language) = lookup(ENV_LANGUAGE) {
        if !config.catalogs.languages.contains(&language) {
            config.catalogs.languages.push(language.clone());
        }
        config.catalogs.default_language = language;
    }

    if let Some(watch) = lookup(ENV_WATCH) {
        config.catalogs.watch = watch.parse().map_err(|e: std::str::ParseBoolError| {
            ConfigError::EnvParse {
                var: ENV_WATCH.to_string(),
                reason: e.to_string(),
            }
        })?;
    }

    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.logging.level = level;
    }

    Ok(())
}
