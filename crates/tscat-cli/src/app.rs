//! Command execution.

use crate::cli::{Command, LookupArgs};
use crate::error::{CliError, CliResult};
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tscat_catalog::{Catalog, CatalogManager, CatalogWatcher};
use tscat_common::LanguageCode;
use tscat_config::Config;

/// A configured catalog manager plus the commands that run against it.
#[derive(Debug)]
pub struct App {
    config: Config,
    manager: CatalogManager,
}

impl App {
    /// Creates the application from a validated configuration.
    pub fn new(config: Config) -> Self {
        let manager = CatalogManager::new(
            config.catalogs.directory.clone(),
            config.catalogs.file_prefix.clone(),
        );
        Self { config, manager }
    }

    /// The active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The catalog manager.
    pub const fn manager(&self) -> &CatalogManager {
        &self.manager
    }

    /// Runs one command, writing its output to `out`.
    pub async fn run<W: Write>(&self, command: Command, out: &mut W) -> CliResult<()> {
        match command {
            Command::Check { files } => self.check(&files, out),
            Command::Lookup(args) => self.lookup(&args, out),
            Command::Stats { languages, json } => self.stats(&languages, json, out),
            Command::Export { language, output } => {
                self.export(language.as_deref(), output.as_deref(), out)
            }
            Command::Watch => {
                let count = self.watch(shutdown_signal()).await?;
                writeln!(out, "Stopped after watching {count} catalogs")?;
                Ok(())
            }
        }
    }

    /// Parses each file and prints its counts, or the error that stopped it.
    ///
    /// Every file is checked even after a failure.
    pub fn check<W: Write>(&self, files: &[PathBuf], out: &mut W) -> CliResult<()> {
        let mut failed = 0;
        for file in files {
            match Catalog::load(file) {
                Ok(catalog) => writeln!(out, "{}: ok, {}", file.display(), catalog.stats())?,
                Err(e) => {
                    failed += 1;
                    error!("Check failed for {}: {}", file.display(), e);
                    writeln!(out, "{}: error: {e}", file.display())?;
                }
            }
        }

        if failed > 0 {
            return Err(CliError::CheckFailed {
                failed,
                total: files.len(),
            });
        }
        Ok(())
    }

    /// Resolves one message and prints the result.
    ///
    /// Prints what a user interface would show unless `raw` is set.
    pub fn lookup<W: Write>(&self, args: &LookupArgs, out: &mut W) -> CliResult<()> {
        let language = self.language(args.language.as_deref())?;
        let catalog = self.catalog(&language)?;
        let comment = args.comment.as_deref();

        let resolution = match args.count {
            Some(count) => catalog.resolve_plural(&args.context, &args.source, count, comment)?,
            None => catalog.resolve(&args.context, &args.source, comment)?,
        };
        if resolution.is_fallback() {
            warn!(
                "No live message for {:?} in context {:?}; printing source text",
                args.source, args.context
            );
        }

        let text = if args.raw {
            resolution.as_str()
        } else {
            resolution.display_text()
        };
        writeln!(out, "{text}")?;
        Ok(())
    }

    /// Prints message counts for the given languages, or for every
    /// configured language when none are given.
    pub fn stats<W: Write>(&self, languages: &[String], json: bool, out: &mut W) -> CliResult<()> {
        let languages = if languages.is_empty() {
            self.config.catalogs.language_codes()?
        } else {
            languages
                .iter()
                .map(|code| LanguageCode::parse(code))
                .collect::<Result<Vec<_>, _>>()?
        };

        for language in &languages {
            let stats = self.catalog(language)?.stats();
            if json {
                writeln!(out, "{}", serde_json::to_string(&stats)?)?;
            } else {
                writeln!(out, "{stats}")?;
            }
        }
        Ok(())
    }

    /// Writes a catalog in canonical layout to `output`, or to `out` when no
    /// output file is given.
    pub fn export<W: Write>(
        &self,
        language: Option<&str>,
        output: Option<&Path>,
        out: &mut W,
    ) -> CliResult<()> {
        let language = self.language(language)?;
        let catalog = self.catalog(&language)?;

        match output {
            Some(path) => {
                catalog.save(path)?;
                info!("Exported {} catalog to {}", language, path.display());
            }
            None => catalog.write_to(&mut *out)?,
        }
        Ok(())
    }

    /// Loads the configured languages and keeps them until `shutdown`
    /// completes, reloading changed files when `catalogs.watch` is set.
    ///
    /// Returns the number of catalogs that were watched.
    pub async fn watch<F>(&self, shutdown: F) -> CliResult<usize>
    where
        F: Future<Output = ()>,
    {
        let languages = self.config.catalogs.language_codes()?;
        let loaded = self.manager.load_all(&languages);
        if loaded == 0 {
            return Err(CliError::NotLoaded(self.default_language()?));
        }

        let watchers = if self.config.catalogs.watch {
            self.spawn_watchers()?
        } else {
            warn!("catalogs.watch is disabled; catalogs will not reload");
            Vec::new()
        };

        info!("Serving {} catalogs, waiting for shutdown", loaded);
        shutdown.await;
        info!("Shutting down {} catalog watchers", watchers.len());
        Ok(watchers.len())
    }

    fn spawn_watchers(&self) -> CliResult<Vec<CatalogWatcher>> {
        self.manager
            .loaded_languages()
            .iter()
            .map(|language| self.manager.watch_language(language).map_err(CliError::from))
            .collect()
    }

    fn default_language(&self) -> CliResult<LanguageCode> {
        Ok(self.config.catalogs.default_language_code()?)
    }

    fn language(&self, requested: Option<&str>) -> CliResult<LanguageCode> {
        match requested {
            Some(code) => Ok(LanguageCode::parse(code)?),
            None => self.default_language(),
        }
    }

    fn catalog(&self, language: &LanguageCode) -> CliResult<Arc<Catalog>> {
        if let Some(catalog) = self.manager.catalog(language) {
            return Ok(catalog);
        }
        Ok(self.manager.load_language(language)?.current())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {:?}", e);
    }
    info!("Received shutdown signal");
}
