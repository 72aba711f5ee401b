//! Process-wide active catalog
//!
//! Applications install one catalog at startup and translate through
//! [`tr`] and [`tr_n`] from anywhere. Installing again publishes a new
//! catalog atomically; lookups already running keep the snapshot they took.

use crate::error::LookupError;
use crate::model::Catalog;
use arc_swap::ArcSwapOption;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::{info, warn};

static ACTIVE: Lazy<ArcSwapOption<Catalog>> = Lazy::new(ArcSwapOption::empty);

/// Makes `catalog` the active catalog, returning the previous one.
pub fn install(catalog: impl Into<Arc<Catalog>>) -> Option<Arc<Catalog>> {
    let catalog = catalog.into();
    info!("Installing active catalog for {}", catalog.language());
    ACTIVE.swap(Some(catalog))
}

/// Removes the active catalog, returning it.
pub fn uninstall() -> Option<Arc<Catalog>> {
    ACTIVE.swap(None)
}

/// The active catalog, if one is installed.
pub fn active() -> Option<Arc<Catalog>> {
    ACTIVE.load_full()
}

/// Translates through the active catalog.
///
/// Unfinished messages, unmatched keys and a missing catalog all yield the
/// source text. An ambiguous key is logged and yields the source text too,
/// so UI code never has to handle lookup errors.
pub fn tr(context: &str, source: &str, comment: Option<&str>) -> String {
    let Some(catalog) = active() else {
        return source.to_string();
    };
    catalog.resolve(context, source, comment).map_or_else(
        |e| ambiguous(&e, source),
        |resolution| resolution.display_text().to_string(),
    )
}

/// Translates a countable message through the active catalog.
///
/// Fallbacks follow [`tr`].
pub fn tr_n(context: &str, source: &str, count: i64, comment: Option<&str>) -> String {
    let Some(catalog) = active() else {
        return source.to_string();
    };
    catalog.resolve_plural(context, source, count, comment).map_or_else(
        |e| ambiguous(&e, source),
        |resolution| resolution.display_text().to_string(),
    )
}

fn ambiguous(error: &LookupError, source: &str) -> String {
    warn!("{}", error);
    source.to_string()
}
