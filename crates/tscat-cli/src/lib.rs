//! # tscat
//!
//! Command line front end for Qt Linguist translation catalogs: checks
//! catalog files, looks up translations, reports message counts, exports
//! catalogs in canonical layout and keeps catalogs live while their files
//! change.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;

pub use app::App;
pub use cli::{Cli, Command, LookupArgs};
pub use error::*;
pub use logging::init_logging;
