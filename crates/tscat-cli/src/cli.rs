//! Command line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tscat_config::Config;

/// Inspect and query Qt Linguist translation catalogs.
#[derive(Parser, Debug)]
#[command(name = "tscat", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (`.toml`, `.yaml` or `.yml`)
    #[arg(short, long, env = "TSCAT_CONFIG", default_value = "tscat.toml")]
    pub config: PathBuf,

    /// Catalog directory, overriding the configuration
    #[arg(long, global = true)]
    pub catalog_dir: Option<PathBuf>,

    /// Log level or filter directive, overriding the configuration
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Reload catalogs when their files change
    #[arg(long, global = true)]
    pub watch: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Applies command line overrides on top of a loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(directory) = &self.catalog_dir {
            config.catalogs.directory.clone_from(directory);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if self.watch {
            config.catalogs.watch = true;
        }
    }
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Parse catalog files and report their message counts
    Check {
        /// Catalog files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Look up the translation of one message
    Lookup(LookupArgs),

    /// Print message counts of loaded catalogs
    Stats {
        /// Languages to report; defaults to the configured languages
        #[arg(short = 'L', long = "language")]
        languages: Vec<String>,

        /// Print one JSON object per catalog
        #[arg(long)]
        json: bool,
    },

    /// Write a catalog back out in canonical layout
    Export {
        /// Language to export; defaults to the configured default language
        #[arg(short = 'L', long)]
        language: Option<String>,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Keep the configured catalogs loaded until interrupted
    Watch,
}

/// Arguments of `lookup`.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct LookupArgs {
    /// Context name, e.g. `UIMessageCenter`
    #[arg(long)]
    pub context: String,

    /// Source text exactly as it appears in the code
    #[arg(long)]
    pub source: String,

    /// Disambiguating comment
    #[arg(long)]
    pub comment: Option<String>,

    /// Pick the plural form for this count
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Language to look up in; defaults to the configured default language
    #[arg(short = 'L', long)]
    pub language: Option<String>,

    /// Print the raw catalog text, empty for unfinished messages
    #[arg(long)]
    pub raw: bool,
}
