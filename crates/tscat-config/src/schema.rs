//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for tscat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog location and language selection.
    pub catalogs: CatalogsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Where catalogs live and which languages to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogsConfig {
    /// Directory holding `<file_prefix>_<lang>.ts` files.
    pub directory: PathBuf,
    /// Catalog file name prefix.
    pub file_prefix: String,
    /// Language used when a command names none.
    pub default_language: String,
    /// Languages to load.
    pub languages: Vec<String>,
    /// Whether to reload catalogs when their files change.
    pub watch: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or `EnvFilter` directive, e.g. `info` or `tscat=debug`.
    pub level: String,
    /// Whether to emit JSON log lines.
    pub json: bool,
}

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (`.toml`)
    Toml,
    /// YAML (`.yaml`, `.yml`)
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}
