//! Main entry point for tscat.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use tscat_cli::{init_logging, App, Cli};
use tscat_config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::new(&cli.config).load().await?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    init_logging(&config.logging)?;
    debug!("Loaded configuration from {}", cli.config.display());

    let app = App::new(config);
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = app.run(cli.command, &mut stdout).await {
        error!("{}", e);
        return Err(e.into());
    }

    Ok(())
}
