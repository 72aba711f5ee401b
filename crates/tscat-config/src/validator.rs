//! Configuration validation.

use crate::loader::ConfigError;
use crate::schema::{CatalogsConfig, Config, LoggingConfig};
use tscat_common::LanguageCode;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Validate a catalog file name prefix.
///
/// The prefix becomes part of a file name, so it must not contain path
/// separators.
pub fn validate_file_prefix(prefix: &str) -> Result<(), ConfigError> {
    if prefix.is_empty() {
        return Err(ConfigError::Validation("catalogs.file_prefix cannot be empty".to_string()));
    }
    if prefix.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "catalogs.file_prefix {prefix:?} must not contain path separators"
        )));
    }
    Ok(())
}

/// Validate a language code.
pub fn validate_language(field: &str, code: &str) -> Result<LanguageCode, ConfigError> {
    LanguageCode::parse(code).map_err(|e| ConfigError::Validation(format!("{field}: {e}")))
}

/// Validate a log level or filter directive.
///
/// Directives naming targets (`tscat=debug`) are passed through to the
/// subscriber, which reports its own errors.
pub fn validate_log_level(level: &str) -> Result<(), ConfigError> {
    if level.contains(['=', ',']) || LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "logging.level {level:?} is not one of {}",
            LOG_LEVELS.join(", ")
        )))
    }
}

impl CatalogsConfig {
    /// Validates the catalog settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ConfigError::Validation("catalogs.directory cannot be empty".to_string()));
        }
        validate_file_prefix(&self.file_prefix)?;

        let default_language = self.default_language_code()?;
        let languages = self.language_codes()?;
        if !languages.contains(&default_language) {
            return Err(ConfigError::Validation(format!(
                "catalogs.default_language {:?} is not listed in catalogs.languages",
                self.default_language
            )));
        }
        Ok(())
    }

    /// The default language, parsed.
    pub fn default_language_code(&self) -> Result<LanguageCode, ConfigError> {
        validate_language("catalogs.default_language", &self.default_language)
    }

    /// The configured languages, parsed.
    pub fn language_codes(&self) -> Result<Vec<LanguageCode>, ConfigError> {
        self.languages
            .iter()
            .map(|code| validate_language("catalogs.languages", code))
            .collect()
    }
}

impl LoggingConfig {
    /// Validates the logging settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_log_level(&self.level)
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catalogs.validate()?;
        self.logging.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_prefix() {
        assert!(validate_file_prefix("VirtualBox").is_ok());
        assert!(validate_file_prefix("qt_help").is_ok());

        assert!(validate_file_prefix("").is_err());
        assert!(validate_file_prefix("nls/VirtualBox").is_err());
        assert!(validate_file_prefix("nls\\VirtualBox").is_err());
    }

    #[test]
    fn test_validate_language() {
        assert!(validate_language("field", "hu").is_ok());
        assert!(validate_language("field", "pt_BR").is_ok());
        assert!(validate_language("field", "zh-Hant").is_ok());

        let err = validate_language("catalogs.languages", "not a language").unwrap_err();
        assert!(err.to_string().contains("catalogs.languages"));
        assert!(validate_language("field", "").is_err());
    }

    #[test]
    fn test_validate_log_level() {
        for level in ["trace", "debug", "INFO", "warn", "error", "off"] {
            assert!(validate_log_level(level).is_ok(), "{level}");
        }
        assert!(validate_log_level("tscat=debug").is_ok());
        assert!(validate_log_level("info,tscat_catalog=trace").is_ok());

        assert!(validate_log_level("verbose").is_err());
        assert!(validate_log_level("").is_err());
    }

    #[test]
    fn test_default_language_must_be_listed() {
        let mut config = Config::default();
        config.catalogs.default_language = "de".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("default_language")));

        config.catalogs.languages.push("de".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_regional_default_language() {
        let mut config = Config::default();
        config.catalogs.default_language = "pt_BR".to_string();
        config.catalogs.languages = vec!["hu".to_string(), "pt_BR".to_string()];
        assert!(config.validate().is_ok());
        assert_eq!(config.catalogs.language_codes().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_directory_rejected() {
        let mut config = Config::default();
        config.catalogs.directory = std::path::PathBuf::new();
        assert!(config.validate().is_err());
    }
}
