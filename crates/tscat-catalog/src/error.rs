//! Error types for catalog loading and lookup operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building, loading or writing a catalog.
///
/// Every parse-time variant names the context being read when the failure
/// happened, so a broken catalog can be fixed without bisecting the file.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The document does not follow the `.ts` grammar
    #[error(
        "Malformed catalog at byte {position} (context: {}): {reason}",
        .context.as_deref().unwrap_or("<none>")
    )]
    Structural {
        /// Context being read, if any
        context: Option<String>,
        /// Byte offset into the document
        position: usize,
        /// What was wrong
        reason: String,
    },

    /// Two messages of one context share source text and comment
    #[error("Duplicate message in context '{context}': source {source_text:?}, comment {comment:?}")]
    DuplicateKey {
        /// Context holding both messages
        context: String,
        /// Shared source text
        source_text: String,
        /// Shared comment, empty when absent
        comment: String,
    },

    /// A numerus message declares no plural forms
    #[error("Message {source_text:?} in context '{context}' declares plural forms but has none")]
    EmptyPluralForms {
        /// Context of the message
        context: String,
        /// Source text of the message
        source_text: String,
    },

    /// The same context name appears twice
    #[error("Duplicate context '{context}'")]
    DuplicateContext {
        /// The repeated name
        context: String,
    },

    /// The catalog language attribute is missing or not a language identifier
    #[error("Invalid catalog language: {code:?}")]
    InvalidLanguage {
        /// The attribute value as written
        code: String,
    },

    /// A reload produced a catalog for another language
    #[error("Catalog language mismatch: expected {expected}, found {found}")]
    LanguageMismatch {
        /// Language the catalog is served as
        expected: String,
        /// Language the new catalog declares
        found: String,
    },

    /// Failed to read a catalog file
    #[error("Failed to read catalog file {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a catalog
    #[error("Failed to write catalog: {0}")]
    Write(String),

    /// Failed to set up a file watcher
    #[error("Failed to watch catalog file: {0}")]
    Watch(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors surfaced by lookups.
///
/// A lookup with no matching message is not an error; it falls back to the
/// source text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// More than one live message matches and no comment was given
    #[error("Ambiguous lookup of {source_text:?} in context '{context}': candidates have comments {comments:?}")]
    Ambiguous {
        /// Context searched
        context: String,
        /// Source text looked up
        source_text: String,
        /// Comments of the candidate messages
        comments: Vec<String>,
    },
}

/// Result type for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;
