//! Tests for core type definitions in tscat-common.
//!
//! This test suite covers:
//! - Language codes keeping their spelling while comparing by meaning
//! - Serialization through plain strings
//! - Rejection of malformed codes

use std::collections::HashMap;
use tscat_common::types::*;

#[cfg(test)]
mod language_code_tests {
    use super::*;

    #[test]
    fn test_language_code_keeps_raw_spelling() {
        let code = LanguageCode::parse("hu_HU").unwrap();
        assert_eq!(code.as_str(), "hu_HU");
        assert_eq!(code.to_string(), "hu_HU");
        assert_eq!(code.primary(), "hu");
        assert_eq!(code.region(), Some("HU"));
    }

    #[test]
    fn test_language_code_without_region() {
        let code: LanguageCode = "hu".parse().unwrap();
        assert_eq!(code.primary(), "hu");
        assert_eq!(code.region(), None);
    }

    #[test]
    fn test_language_code_same_language_across_separators() {
        let underscore = LanguageCode::parse("pt_BR").unwrap();
        let hyphen = LanguageCode::parse("pt-BR").unwrap();
        assert!(underscore.same_language(&hyphen));
        assert_ne!(underscore, hyphen);
    }

    #[test]
    fn test_bare_code_covers_regional_spelling() {
        let hu = LanguageCode::parse("hu").unwrap();
        let hu_hu = LanguageCode::parse("hu_HU").unwrap();
        assert!(hu.covers(&hu_hu));
        assert!(hu.covers(&hu));
        assert!(!hu_hu.covers(&hu));

        let pt_br = LanguageCode::parse("pt_BR").unwrap();
        assert!(pt_br.covers(&LanguageCode::parse("pt-BR").unwrap()));
        assert!(!pt_br.covers(&LanguageCode::parse("pt_PT").unwrap()));
        assert!(!hu.covers(&LanguageCode::parse("de").unwrap()));
    }

    #[test]
    fn test_language_code_hashable() {
        let mut map = HashMap::new();
        map.insert(LanguageCode::parse("hu").unwrap(), "Magyar");
        assert_eq!(map.get(&LanguageCode::parse("hu").unwrap()), Some(&"Magyar"));
    }

    #[test]
    fn test_language_code_rejects_garbage() {
        assert!(LanguageCode::parse("").is_err());
        assert!(LanguageCode::parse("   ").is_err());
        assert!(LanguageCode::parse("not a language").is_err());

        let err = LanguageCode::parse("").unwrap_err();
        assert!(matches!(err, TscatError::InvalidLanguage(_)));
    }

    #[test]
    fn test_language_code_serialization() {
        let code = LanguageCode::parse("hu").unwrap();

        let serialized = serde_json::to_string(&code).unwrap();
        assert_eq!(serialized, "\"hu\"");

        let deserialized: LanguageCode = serde_json::from_str("\"de_DE\"").unwrap();
        assert_eq!(deserialized.primary(), "de");

        let invalid: std::result::Result<LanguageCode, _> = serde_json::from_str("\"!!\"");
        assert!(invalid.is_err());
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TscatError::Config("missing directory".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing directory");

        let err = TscatError::InvalidLanguage("xx yy".to_string());
        assert_eq!(err.to_string(), "Invalid language code: \"xx yy\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TscatError = io.into();
        assert!(matches!(err, TscatError::Io(_)));
    }
}
