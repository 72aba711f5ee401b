//! In-memory catalog tree: catalog, contexts, messages
//!
//! A [`Catalog`] is assembled once through a [`CatalogBuilder`] and is
//! read-only afterwards. Contexts keep their document order for display and
//! writing; lookups go through name and source-text indexes.

use crate::error::{CatalogError, CatalogResult};
use crate::numerus::{NumerusRule, PluralRule};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tscat_common::LanguageCode;

/// Format version written when a catalog does not carry one.
pub const DEFAULT_TS_VERSION: &str = "2.1";

/// Translation status of a message, fixed at parse time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Translated and in use
    #[default]
    Final,
    /// Present but not translated yet
    Unfinished,
    /// Kept for history, never returned by lookups
    Obsolete,
}

impl MessageStatus {
    /// Classifies the `type` attribute of a `<translation>` element.
    ///
    /// Returns `None` for values outside the format.
    pub fn from_type_attribute(value: Option<&str>) -> Option<Self> {
        match value {
            None => Some(Self::Final),
            Some("unfinished") => Some(Self::Unfinished),
            Some("obsolete" | "vanished") => Some(Self::Obsolete),
            Some(_) => None,
        }
    }

    /// The `type` attribute value written for this status.
    pub const fn type_attribute(self) -> Option<&'static str> {
        match self {
            Self::Final => None,
            Self::Unfinished => Some("unfinished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    /// Whether lookups may return messages with this status.
    pub const fn is_live(self) -> bool {
        !matches!(self, Self::Obsolete)
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Final => "final",
            Self::Unfinished => "unfinished",
            Self::Obsolete => "obsolete",
        })
    }
}

/// Translated text of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// A single translation
    Single(String),
    /// Plural forms ordered by the language's plural category index
    Plural(Vec<String>),
}

impl Translation {
    /// Text for the given plural form index.
    ///
    /// Indexes past the last form select the last form; a single
    /// translation ignores the index.
    pub fn form(&self, index: usize) -> &str {
        match self {
            Self::Single(text) => text,
            Self::Plural(forms) => forms
                .get(index)
                .or_else(|| forms.last())
                .map_or("", String::as_str),
        }
    }

    /// All plural forms, or the single translation as a one-element slice.
    pub fn forms(&self) -> &[String] {
        match self {
            Self::Single(text) => std::slice::from_ref(text),
            Self::Plural(forms) => forms,
        }
    }

    /// Whether this is a plural form set.
    pub const fn is_plural(&self) -> bool {
        matches!(self, Self::Plural(_))
    }
}

/// A source code location a message was extracted from.
///
/// Both attributes are kept as written: `line` may be relative (`+3`) and
/// `filename` may be omitted when it repeats the previous location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// Source file, relative to the catalog
    pub filename: Option<String>,
    /// Line number
    pub line: Option<String>,
}

/// The atomic translatable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: Option<String>,
    source: String,
    comment: Option<String>,
    extra_comment: Option<String>,
    translator_comment: Option<String>,
    locations: Vec<Location>,
    translation: Translation,
    status: MessageStatus,
}

impl Message {
    /// Creates a final message with a single translation.
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self::with_translation(source, Translation::Single(translation.into()))
    }

    /// Creates a final numerus message with the given plural forms.
    pub fn plural<I, S>(source: impl Into<String>, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let forms = forms.into_iter().map(Into::into).collect();
        Self::with_translation(source, Translation::Plural(forms))
    }

    /// Creates a final message from a prepared translation.
    pub fn with_translation(source: impl Into<String>, translation: Translation) -> Self {
        Self {
            id: None,
            source: source.into(),
            comment: None,
            extra_comment: None,
            translator_comment: None,
            locations: Vec::new(),
            translation,
            status: MessageStatus::Final,
        }
    }

    /// Sets the disambiguating comment. An empty comment means none.
    #[must_use]
    pub fn comment(mut self, comment: Option<impl Into<String>>) -> Self {
        self.comment = comment.map(Into::into).filter(|c: &String| !c.is_empty());
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: MessageStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the message id attribute.
    #[must_use]
    pub fn id(mut self, id: Option<impl Into<String>>) -> Self {
        self.id = id.map(Into::into);
        self
    }

    /// Sets the developer note shown to translators.
    #[must_use]
    pub fn extra_comment(mut self, note: Option<impl Into<String>>) -> Self {
        self.extra_comment = note.map(Into::into);
        self
    }

    /// Sets the translator's own note.
    #[must_use]
    pub fn translator_comment(mut self, note: Option<impl Into<String>>) -> Self {
        self.translator_comment = note.map(Into::into);
        self
    }

    /// Appends a source location.
    #[must_use]
    pub fn location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    /// Untranslated text as authored in code.
    pub fn source_text(&self) -> &str {
        &self.source
    }

    /// Disambiguating comment.
    pub fn disambiguation(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Comment, or the empty string when there is none. This is the third
    /// part of the message key.
    pub fn comment_or_empty(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// Message id attribute.
    pub fn message_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Developer note.
    pub fn extra_note(&self) -> Option<&str> {
        self.extra_comment.as_deref()
    }

    /// Translator note.
    pub fn translator_note(&self) -> Option<&str> {
        self.translator_comment.as_deref()
    }

    /// Source locations.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Translated text.
    pub const fn translation(&self) -> &Translation {
        &self.translation
    }

    /// Translation status.
    pub const fn message_status(&self) -> MessageStatus {
        self.status
    }

    /// Whether the message carries plural forms.
    pub const fn is_numerus(&self) -> bool {
        self.translation.is_plural()
    }

    /// Whether lookups may return this message.
    pub const fn is_live(&self) -> bool {
        self.status.is_live()
    }
}

/// A named group of messages, usually one UI class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    name: String,
    comment: Option<String>,
    messages: Vec<Message>,
    by_source: HashMap<String, Vec<usize>>,
}

impl Context {
    /// Creates an empty context.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
            messages: Vec::new(),
            by_source: HashMap::new(),
        }
    }

    /// Sets the context-level comment.
    #[must_use]
    pub fn with_comment(mut self, comment: Option<impl Into<String>>) -> Self {
        self.comment = comment.map(Into::into).filter(|c: &String| !c.is_empty());
        self
    }

    /// Appends a message, rejecting empty plural form sets and duplicate
    /// (source text, comment) keys.
    pub fn push(&mut self, message: Message) -> CatalogResult<()> {
        if matches!(&message.translation, Translation::Plural(forms) if forms.is_empty()) {
            return Err(CatalogError::EmptyPluralForms {
                context: self.name.clone(),
                source_text: message.source,
            });
        }

        if self
            .messages_with_source(&message.source)
            .any(|existing| existing.comment_or_empty() == message.comment_or_empty())
        {
            return Err(CatalogError::DuplicateKey {
                context: self.name.clone(),
                source_text: message.source,
                comment: message.comment.unwrap_or_default(),
            });
        }

        self.by_source
            .entry(message.source.clone())
            .or_default()
            .push(self.messages.len());
        self.messages.push(message);
        Ok(())
    }

    /// Context name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Context-level comment.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Messages in document order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// All messages sharing a source text, obsolete ones included.
    pub fn messages_with_source<'a>(&'a self, source: &str) -> impl Iterator<Item = &'a Message> + 'a {
        self.by_source
            .get(source)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&index| &self.messages[index])
    }

    /// Exact key lookup, obsolete messages included.
    pub fn find(&self, source: &str, comment: Option<&str>) -> Option<&Message> {
        let comment = comment.unwrap_or("");
        self.messages_with_source(source)
            .find(|message| message.comment_or_empty() == comment)
    }
}

/// All contexts of one target language.
pub struct Catalog {
    version: String,
    language: LanguageCode,
    source_language: Option<LanguageCode>,
    contexts: Vec<Context>,
    index: HashMap<String, usize>,
    plural_rule: Arc<dyn PluralRule>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("version", &self.version)
            .field("language", &self.language)
            .field("source_language", &self.source_language)
            .field("contexts", &self.contexts.len())
            .field("plural_rule", &self.plural_rule)
            .finish()
    }
}

// Plural rules are behaviour, not data: two catalogs are equal when their
// documents are.
impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.language == other.language
            && self.source_language == other.source_language
            && self.contexts == other.contexts
    }
}

impl Eq for Catalog {}

impl Catalog {
    /// Starts building a catalog for a language.
    pub fn builder(language: LanguageCode) -> CatalogBuilder {
        CatalogBuilder::new(language)
    }

    /// Format version from the document header.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Target language.
    pub const fn language(&self) -> &LanguageCode {
        &self.language
    }

    /// Language the source texts are written in, if declared.
    pub const fn source_language(&self) -> Option<&LanguageCode> {
        self.source_language.as_ref()
    }

    /// Contexts in document order.
    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    /// Looks up a context by name.
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.index.get(name).map(|&index| &self.contexts[index])
    }

    /// Plural rule used by plural lookups.
    pub fn plural_rule(&self) -> &dyn PluralRule {
        self.plural_rule.as_ref()
    }

    /// Replaces the plural rule derived from the language.
    #[must_use]
    pub fn with_plural_rule(mut self, rule: Arc<dyn PluralRule>) -> Self {
        self.plural_rule = rule;
        self
    }

    /// Iterates over every (context, message) pair in document order.
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|context| context.messages.iter().map(move |message| (context, message)))
    }

    /// Counts contexts and messages by status.
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            language: self.language.to_string(),
            contexts: self.contexts.len(),
            ..CatalogStats::default()
        };

        for (_, message) in self.messages() {
            stats.messages += 1;
            match message.status {
                MessageStatus::Final => stats.finished += 1,
                MessageStatus::Unfinished => stats.unfinished += 1,
                MessageStatus::Obsolete => stats.obsolete += 1,
            }
            if message.is_numerus() {
                stats.numerus += 1;
            }
        }

        stats
    }
}

/// Assembles a [`Catalog`], enforcing unique context names.
pub struct CatalogBuilder {
    version: String,
    language: LanguageCode,
    source_language: Option<LanguageCode>,
    contexts: Vec<Context>,
    index: HashMap<String, usize>,
    plural_rule: Option<Arc<dyn PluralRule>>,
}

impl CatalogBuilder {
    /// Creates a builder with the default format version.
    pub fn new(language: LanguageCode) -> Self {
        Self {
            version: DEFAULT_TS_VERSION.to_string(),
            language,
            source_language: None,
            contexts: Vec::new(),
            index: HashMap::new(),
            plural_rule: None,
        }
    }

    /// Sets the format version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the source language.
    #[must_use]
    pub fn source_language(mut self, language: Option<LanguageCode>) -> Self {
        self.source_language = language;
        self
    }

    /// Overrides the plural rule derived from the language.
    #[must_use]
    pub fn plural_rule(mut self, rule: Arc<dyn PluralRule>) -> Self {
        self.plural_rule = Some(rule);
        self
    }

    /// Adds a complete context. Context names must be unique.
    pub fn add_context(&mut self, context: Context) -> CatalogResult<()> {
        if self.index.contains_key(&context.name) {
            return Err(CatalogError::DuplicateContext {
                context: context.name,
            });
        }
        self.index.insert(context.name.clone(), self.contexts.len());
        self.contexts.push(context);
        Ok(())
    }

    /// Adds a message to a context, creating the context on first use.
    pub fn add_message(&mut self, context: &str, message: Message) -> CatalogResult<()> {
        let index = match self.index.get(context) {
            Some(&index) => index,
            None => {
                self.add_context(Context::new(context))?;
                self.contexts.len() - 1
            }
        };
        self.contexts[index].push(message)
    }

    /// Finishes the catalog.
    pub fn build(self) -> Catalog {
        let plural_rule = self
            .plural_rule
            .unwrap_or_else(|| Arc::new(NumerusRule::for_language(&self.language)));

        Catalog {
            version: self.version,
            language: self.language,
            source_language: self.source_language,
            contexts: self.contexts,
            index: self.index,
            plural_rule,
        }
    }
}

/// Message counts of a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Target language
    pub language: String,
    /// Number of contexts
    pub contexts: usize,
    /// Number of messages
    pub messages: usize,
    /// Final messages
    pub finished: usize,
    /// Unfinished messages
    pub unfinished: usize,
    /// Obsolete messages
    pub obsolete: usize,
    /// Messages with plural forms
    pub numerus: usize,
}

impl fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} contexts, {} messages ({} final, {} unfinished, {} obsolete, {} numerus)",
            self.language,
            self.contexts,
            self.messages,
            self.finished,
            self.unfinished,
            self.obsolete,
            self.numerus
        )
    }
}
