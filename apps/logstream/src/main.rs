//! `logstream` command-line entry point.

mod app;
mod cli;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Settings;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries the log lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load(cli.config.as_deref())?.merge_cli(&cli);
    let descriptor = cli.descriptor()?;
    tracing::debug!(site = %descriptor.site, env = %descriptor.environment, "starting log stream");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app::run(&cli.url, descriptor, settings))?;

    Ok(())
}
