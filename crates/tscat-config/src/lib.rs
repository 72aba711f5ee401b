//! # tscat Config
//!
//! Type-safe configuration for tscat.
//!
//! This crate loads the catalog and logging settings from TOML or YAML,
//! applies environment overrides and validates the result before anything
//! touches a catalog file.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
