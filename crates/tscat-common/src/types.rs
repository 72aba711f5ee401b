//! Common type definitions and newtype wrappers for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A catalog language code as written in a catalog or configuration file.
///
/// The raw spelling (`hu`, `hu_HU`, `pt-BR`) is kept verbatim so that a
/// catalog can be written back unchanged, while the parsed identifier is
/// used for plural rule dispatch and comparisons between spellings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode {
    raw: String,
    id: LanguageIdentifier,
}

impl LanguageCode {
    /// Parses and validates a language code.
    pub fn parse(code: &str) -> std::result::Result<Self, TscatError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(TscatError::InvalidLanguage(code.to_string()));
        }

        let id = LanguageIdentifier::from_bytes(trimmed.as_bytes())
            .map_err(|_| TscatError::InvalidLanguage(code.to_string()))?;

        Ok(Self {
            raw: trimmed.to_string(),
            id,
        })
    }

    /// The code exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed language identifier.
    pub const fn identifier(&self) -> &LanguageIdentifier {
        &self.id
    }

    /// The lowercase primary language subtag, e.g. `hu` for `hu_HU`.
    pub fn primary(&self) -> &str {
        self.id.language.as_str()
    }

    /// The region subtag, if any.
    pub fn region(&self) -> Option<&str> {
        self.id.region.as_ref().map(|region| region.as_str())
    }

    /// Whether two codes name the same language regardless of spelling.
    pub fn same_language(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Whether a catalog declaring `declared` may be served under this code.
    ///
    /// A bare language code (`hu`) covers its regional variants (`hu_HU`);
    /// a code with a region, script or variant only covers itself.
    pub fn covers(&self, declared: &Self) -> bool {
        if self.same_language(declared) {
            return true;
        }
        self.id.region.is_none()
            && self.id.script.is_none()
            && self.id.variants().next().is_none()
            && self.primary() == declared.primary()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for LanguageCode {
    type Err = TscatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = TscatError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(value: LanguageCode) -> Self {
        value.raw
    }
}

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum TscatError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid language code.
    #[error("Invalid language code: {0:?}")]
    InvalidLanguage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
