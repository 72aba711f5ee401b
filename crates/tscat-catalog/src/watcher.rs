//! Hot reload of catalog files
//!
//! Editors often replace a file instead of writing it in place, so the
//! watcher observes the parent directory and filters events by file name.

use crate::error::{CatalogError, CatalogResult};
use crate::store::CatalogStore;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Reloads a [`CatalogStore`] whenever its catalog file changes.
///
/// Watching stops when the watcher is dropped.
pub struct CatalogWatcher {
    path: PathBuf,
    _watcher: RecommendedWatcher,
}

impl CatalogWatcher {
    /// Starts watching `path` and reloading `store` from it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Watch`] if the platform watcher cannot be
    /// created or the directory cannot be watched.
    pub fn spawn(store: Arc<CatalogStore>, path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| CatalogError::Watch(format!("{} is not a file path", path.display())))?;
        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let reload_path = path.clone();
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            match result {
                Ok(event) if is_reload_event(&event, &file_name) => {
                    debug!("Catalog file changed: {:?}", event.paths);
                    // Errors are logged by the store; the old catalog stays.
                    if store.reload_from(&reload_path).is_ok() {
                        info!("Reloaded catalog from {:?}", reload_path);
                    }
                }
                Ok(_) => {}
                Err(e) => error!("Catalog watch error: {}", e),
            }
        })
        .map_err(|e| CatalogError::Watch(e.to_string()))?;

        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|e| CatalogError::Watch(e.to_string()))?;
        info!("Watching {:?} for catalog changes", path);

        Ok(Self {
            path,
            _watcher: watcher,
        })
    }

    /// The watched catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Whether a file system event should trigger a reload of `file_name`.
pub fn is_reload_event(event: &Event, file_name: &OsStr) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|changed| changed.file_name() == Some(file_name))
}
