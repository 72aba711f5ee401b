//! Default values.

use crate::schema::{CatalogsConfig, LoggingConfig};
use std::path::PathBuf;

/// Default catalog directory, relative to the working directory.
pub const DEFAULT_CATALOG_DIR: &str = "translations";

/// Default catalog file name prefix.
pub const DEFAULT_FILE_PREFIX: &str = "VirtualBox";

/// Default catalog language.
pub const DEFAULT_LANGUAGE: &str = "hu";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

impl Default for CatalogsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_CATALOG_DIR),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            languages: vec![DEFAULT_LANGUAGE.to_string()],
            watch: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::Config;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.catalogs.directory.to_str(), Some("translations"));
        assert_eq!(config.catalogs.file_prefix, "VirtualBox");
        assert_eq!(config.catalogs.default_language, "hu");
        assert_eq!(config.catalogs.languages, ["hu"]);
        assert!(!config.catalogs.watch);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }
}
