//! Shared utility functions.

use crate::types::LanguageCode;

/// File extension used by Qt Linguist translation sources.
pub const CATALOG_EXTENSION: &str = "ts";

/// Builds the conventional catalog file name, e.g. `VirtualBox_hu.ts`.
pub fn catalog_file_name(prefix: &str, language: &LanguageCode) -> String {
    format!("{prefix}_{}.{CATALOG_EXTENSION}", language.as_str())
}

/// Extracts the language part from a conventional catalog file name.
///
/// Returns `None` when the name does not follow `<prefix>_<lang>.ts`.
pub fn language_from_file_name<'a>(prefix: &str, file_name: &'a str) -> Option<&'a str> {
    let stem = file_name.strip_suffix(CATALOG_EXTENSION)?.strip_suffix('.')?;
    let language = stem.strip_prefix(prefix)?.strip_prefix('_')?;
    (!language.is_empty()).then_some(language)
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
