//! Climate Observatory - menu-driven climate & health data explorer.

use clap::Parser;
use climate_observatory::config::{Cli, Settings};
use climate_observatory::console::{Console, Session};
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let settings = Settings::from(Cli::parse());
    tracing::debug!(?settings, "starting session");

    let console = Console::new(io::stdin().lock(), io::stdout());
    Session::new(settings, console).run()?;
    Ok(())
}
