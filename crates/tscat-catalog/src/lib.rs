//! # tscat Catalog
//!
//! Qt Linguist `.ts` translation catalogs: parsing, lookup resolution,
//! plural rules, writing and hot reloading.
//!
//! A [`Catalog`] is parsed in one pass and is immutable afterwards. Lookups
//! go through [`Catalog::resolve`] and [`Catalog::resolve_plural`]; a key
//! with no live message falls back to its source text. Runtime replacement
//! happens by publishing a new catalog into a [`CatalogStore`] or the
//! process-wide [`global`] slot.
//!
//! ```
//! use tscat_catalog::Catalog;
//!
//! let catalog: Catalog = r#"<TS version="2.1" language="hu">
//! <context>
//!     <name>UIMessageCenter</name>
//!     <message>
//!         <source>Yes</source>
//!         <translation>Igen</translation>
//!     </message>
//! </context>
//! </TS>"#
//!     .parse()
//!     .unwrap();
//!
//! let yes = catalog.resolve("UIMessageCenter", "Yes", None).unwrap();
//! assert_eq!(yes.as_str(), "Igen");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod global;
pub mod manager;
pub mod model;
pub mod numerus;
pub mod parser;
pub mod resolver;
pub mod store;
pub mod watcher;
pub mod writer;

pub use error::{CatalogError, CatalogResult, LookupError, LookupResult};
pub use manager::CatalogManager;
pub use model::{
    Catalog, CatalogBuilder, CatalogStats, Context, Location, Message, MessageStatus, Translation,
    DEFAULT_TS_VERSION,
};
pub use numerus::{NumerusRule, PluralRule};
pub use parser::{parse_reader, parse_str};
pub use resolver::Resolution;
pub use store::CatalogStore;
pub use watcher::CatalogWatcher;
