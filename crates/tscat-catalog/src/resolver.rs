//! Lookup resolution against a loaded catalog
//!
//! Keys are `(context, source text, comment)`. A lookup that names no comment
//! must be unambiguous among live messages; a lookup that finds nothing falls
//! back to the caller's source text instead of failing.

use crate::error::{LookupError, LookupResult};
use crate::model::{Catalog, Message, MessageStatus};
use crate::numerus::PluralRule;
use std::fmt;
use tracing::debug;
use tscat_common::utils::truncate_string;

const LOG_TEXT_LIMIT: usize = 60;

/// Outcome of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A final translation
    Translated(&'a str),
    /// The message exists but is not translated yet
    Unfinished {
        /// Source text of the message
        source: &'a str,
    },
    /// No live message matched; carries the caller's source text
    Fallback(&'a str),
}

impl<'a> Resolution<'a> {
    /// The resolved catalog text.
    ///
    /// Unfinished messages resolve to the empty string.
    pub const fn as_str(&self) -> &'a str {
        match *self {
            Self::Translated(text) | Self::Fallback(text) => text,
            Self::Unfinished { .. } => "",
        }
    }

    /// Text to show in a user interface. Unfinished messages show their
    /// source text rather than a blank.
    pub const fn display_text(&self) -> &'a str {
        match *self {
            Self::Translated(text) | Self::Fallback(text) => text,
            Self::Unfinished { source } => source,
        }
    }

    /// Whether the lookup matched a live message.
    pub const fn is_match(&self) -> bool {
        !matches!(self, Self::Fallback(_))
    }

    /// Whether the lookup fell back to the source text.
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

impl fmt::Display for Resolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Catalog {
    /// Resolves a message to its translation.
    ///
    /// Numerus messages resolve to their first plural form.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Ambiguous`] when `comment` is `None` and more
    /// than one live message in the context shares `source`.
    pub fn resolve<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: Option<&str>,
    ) -> LookupResult<Resolution<'a>> {
        let resolution = match self.find_live(context, source, comment)? {
            Some(message) => resolution_for(message, 0),
            None => fallback(context, source),
        };
        Ok(resolution)
    }

    /// Resolves a message, picking the plural form for `count` with the
    /// catalog's plural rule.
    ///
    /// # Errors
    ///
    /// Same as [`Catalog::resolve`].
    pub fn resolve_plural<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        count: i64,
        comment: Option<&str>,
    ) -> LookupResult<Resolution<'a>> {
        self.resolve_plural_with(self.plural_rule(), context, source, count, comment)
    }

    /// Resolves a message, picking the plural form for `count` with the
    /// given plural rule.
    ///
    /// # Errors
    ///
    /// Same as [`Catalog::resolve`].
    pub fn resolve_plural_with<'a>(
        &'a self,
        rule: &dyn PluralRule,
        context: &str,
        source: &'a str,
        count: i64,
        comment: Option<&str>,
    ) -> LookupResult<Resolution<'a>> {
        let resolution = match self.find_live(context, source, comment)? {
            Some(message) => resolution_for(message, rule.form_index(count)),
            None => fallback(context, source),
        };
        Ok(resolution)
    }

    /// Finds the live message a lookup selects, if any.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Ambiguous`] when `comment` is `None` and more
    /// than one live message shares `source`.
    pub fn find_live(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
    ) -> LookupResult<Option<&Message>> {
        let Some(ctx) = self.context(context) else {
            return Ok(None);
        };

        if let Some(comment) = comment {
            return Ok(ctx
                .messages_with_source(source)
                .find(|message| message.is_live() && message.comment_or_empty() == comment));
        }

        let mut candidates = ctx.messages_with_source(source).filter(|message| message.is_live());
        let Some(first) = candidates.next() else {
            return Ok(None);
        };
        let rest: Vec<&Message> = candidates.collect();
        if rest.is_empty() {
            return Ok(Some(first));
        }

        let comments = std::iter::once(first)
            .chain(rest)
            .map(|message| message.comment_or_empty().to_string())
            .collect();
        Err(LookupError::Ambiguous {
            context: context.to_string(),
            source_text: source.to_string(),
            comments,
        })
    }
}

fn resolution_for(message: &Message, form: usize) -> Resolution<'_> {
    match message.message_status() {
        MessageStatus::Unfinished => Resolution::Unfinished {
            source: message.source_text(),
        },
        _ => Resolution::Translated(message.translation().form(form)),
    }
}

fn fallback<'a>(context: &str, source: &'a str) -> Resolution<'a> {
    debug!(
        "No translation in context '{}' for {:?}; using source text",
        context,
        truncate_string(source, LOG_TEXT_LIMIT)
    );
    Resolution::Fallback(source)
}
