//! Per-language catalog management
//!
//! Catalogs live in one directory as `<prefix>_<lang>.ts`. The manager keeps
//! one [`CatalogStore`] per language, so a reload replaces a language's
//! catalog in place instead of adding a second one.

use crate::error::{CatalogError, CatalogResult};
use crate::model::Catalog;
use crate::store::CatalogStore;
use crate::watcher::CatalogWatcher;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tscat_common::utils::{catalog_file_name, language_from_file_name};
use tscat_common::LanguageCode;

/// Loads and serves the catalogs of several languages.
#[derive(Debug)]
pub struct CatalogManager {
    directory: PathBuf,
    file_prefix: String,
    stores: DashMap<LanguageCode, Arc<CatalogStore>>,
}

impl CatalogManager {
    /// Creates a manager for catalogs named `<file_prefix>_<lang>.ts` in
    /// `directory`. Nothing is loaded yet.
    pub fn new(directory: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_prefix: file_prefix.into(),
            stores: DashMap::new(),
        }
    }

    /// Catalog directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File name prefix.
    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }

    /// Path of the catalog file for a language.
    pub fn path_for(&self, language: &LanguageCode) -> PathBuf {
        self.directory.join(catalog_file_name(&self.file_prefix, language))
    }

    /// Loads a language's catalog from its file.
    ///
    /// Loading an already loaded language publishes the new catalog into the
    /// existing store.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, or declares a language
    /// its name does not cover. `VirtualBox_hu.ts` may declare `hu_HU`.
    pub fn load_language(&self, language: &LanguageCode) -> CatalogResult<Arc<CatalogStore>> {
        let catalog = Catalog::load(self.path_for(language))?;
        if !language.covers(catalog.language()) {
            return Err(CatalogError::LanguageMismatch {
                expected: language.to_string(),
                found: catalog.language().to_string(),
            });
        }

        match self.stores.entry(language.clone()) {
            Entry::Occupied(entry) => {
                let store = Arc::clone(entry.get());
                drop(entry);
                store.publish(catalog)?;
                Ok(store)
            }
            Entry::Vacant(entry) => {
                let store = Arc::new(CatalogStore::new(catalog));
                entry.insert(Arc::clone(&store));
                info!("Registered catalog for language {}", language);
                Ok(store)
            }
        }
    }

    /// Re-reads a language's catalog file. A language that is not loaded
    /// yet is loaded.
    ///
    /// # Errors
    ///
    /// Fails like [`CatalogManager::load_language`]; the previous catalog
    /// stays published.
    pub fn reload_language(&self, language: &LanguageCode) -> CatalogResult<()> {
        match self.store(language) {
            Some(store) => store.reload_from(self.path_for(language)),
            None => self.load_language(language).map(|_| ()),
        }
    }

    /// Reloads a language whenever its catalog file changes, loading it
    /// first if needed.
    ///
    /// # Errors
    ///
    /// Fails if the initial load fails or the file cannot be watched.
    pub fn watch_language(&self, language: &LanguageCode) -> CatalogResult<CatalogWatcher> {
        let store = match self.store(language) {
            Some(store) => store,
            None => self.load_language(language)?,
        };
        CatalogWatcher::spawn(store, self.path_for(language))
    }

    /// Loads every listed language, logging and skipping failures.
    ///
    /// Returns the number of languages loaded.
    pub fn load_all(&self, languages: &[LanguageCode]) -> usize {
        languages
            .iter()
            .filter(|language| match self.load_language(language) {
                Ok(_) => true,
                Err(e) => {
                    error!("Failed to load catalog for {}: {}", language, e);
                    false
                }
            })
            .count()
    }

    /// Lists the languages that have a catalog file in the directory,
    /// sorted by code.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be read.
    pub fn discover(&self) -> CatalogResult<Vec<LanguageCode>> {
        let io_error = |source: std::io::Error| CatalogError::Io {
            path: self.directory.clone(),
            source,
        };

        let mut languages = Vec::new();
        for entry in fs::read_dir(&self.directory).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;
            let file_name = entry.file_name();
            let Some(code) = file_name
                .to_str()
                .and_then(|name| language_from_file_name(&self.file_prefix, name))
            else {
                continue;
            };
            match LanguageCode::parse(code) {
                Ok(language) => languages.push(language),
                Err(e) => debug!("Skipping {:?}: {}", entry.path(), e),
            }
        }

        languages.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(languages)
    }

    /// The store of a loaded language.
    pub fn store(&self, language: &LanguageCode) -> Option<Arc<CatalogStore>> {
        self.stores.get(language).map(|entry| Arc::clone(entry.value()))
    }

    /// The current catalog of a loaded language.
    pub fn catalog(&self, language: &LanguageCode) -> Option<Arc<Catalog>> {
        self.store(language).map(|store| store.current())
    }

    /// Loaded languages, sorted by code.
    pub fn loaded_languages(&self) -> Vec<LanguageCode> {
        let mut languages: Vec<_> = self.stores.iter().map(|entry| entry.key().clone()).collect();
        languages.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        languages
    }

    /// Drops a language's catalog.
    pub fn unload_language(&self, language: &LanguageCode) -> bool {
        self.stores.remove(language).is_some()
    }

    /// Translates through a language's catalog for display.
    ///
    /// Falls back to the source text when the language is not loaded or
    /// the key is ambiguous.
    pub fn tr(
        &self,
        language: &LanguageCode,
        context: &str,
        source: &str,
        comment: Option<&str>,
    ) -> String {
        let Some(catalog) = self.catalog(language) else {
            warn!("No catalog loaded for {}; using source text", language);
            return source.to_string();
        };
        catalog.resolve(context, source, comment).map_or_else(
            |e| {
                warn!("{}", e);
                source.to_string()
            },
            |resolution| resolution.display_text().to_string(),
        )
    }
}
