//! Application-wide error types using thiserror.

use tscat_catalog::{CatalogError, LookupError};
use tscat_common::{LanguageCode, TscatError};
use tscat_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog loading, writing or watching error.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Lookup error.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Invalid input such as a malformed language code.
    #[error(transparent)]
    Common(#[from] TscatError),

    /// A command needed a catalog that could not be loaded.
    #[error("No catalog available for language {0}")]
    NotLoaded(LanguageCode),

    /// One or more files failed `check`.
    #[error("{failed} of {total} catalogs failed to parse")]
    CheckFailed {
        /// Files that failed
        failed: usize,
        /// Files checked
        total: usize,
    },

    /// Logging could not be set up.
    #[error("Failed to initialize logging: {0}")]
    Logging(String),

    /// JSON output error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the command line application.
pub type CliResult<T> = Result<T, CliError>;
