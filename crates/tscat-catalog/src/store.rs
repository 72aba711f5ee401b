//! Thread-safe catalog publication with arc-swap for lock-free reads.

use crate::error::{CatalogError, CatalogResult};
use crate::model::Catalog;
use arc_swap::ArcSwap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tscat_common::LanguageCode;

/// Holds the current catalog of one language.
///
/// Readers take an `Arc` snapshot and keep using it while a reload swaps in
/// a replacement; a snapshot is never modified.
pub struct CatalogStore {
    catalog: ArcSwap<Catalog>,
}

impl CatalogStore {
    /// Creates a store holding the given catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: ArcSwap::from_pointee(catalog),
        }
    }

    /// Loads a catalog file into a new store.
    pub fn load<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        Catalog::load(path).map(Self::new)
    }

    /// Gets the current catalog.
    pub fn current(&self) -> Arc<Catalog> {
        self.catalog.load_full()
    }

    /// Language of the current catalog.
    pub fn language(&self) -> LanguageCode {
        self.catalog.load().language().clone()
    }

    /// Replaces the catalog atomically.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::LanguageMismatch`] if `catalog` targets a
    /// different language; the current catalog stays published. Spellings
    /// of one language (`pt_BR`, `pt-BR`) are accepted.
    pub fn publish(&self, catalog: Catalog) -> CatalogResult<()> {
        let expected = self.language();
        if !catalog.language().same_language(&expected) {
            return Err(CatalogError::LanguageMismatch {
                expected: expected.to_string(),
                found: catalog.language().to_string(),
            });
        }

        let stats = catalog.stats();
        self.catalog.store(Arc::new(catalog));
        info!("Published catalog {}", stats);
        Ok(())
    }

    /// Parses a catalog file and publishes it.
    ///
    /// A failed reload leaves the current catalog in place.
    pub fn reload_from<P: AsRef<Path>>(&self, path: P) -> CatalogResult<()> {
        let path = path.as_ref();
        let result = Catalog::load(path).and_then(|catalog| self.publish(catalog));
        if let Err(e) = &result {
            warn!("Reload of {:?} rejected, keeping previous catalog: {}", path, e);
        }
        result
    }
}

impl fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogStore")
            .field("catalog", &self.current())
            .finish()
    }
}

impl From<Catalog> for CatalogStore {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}
