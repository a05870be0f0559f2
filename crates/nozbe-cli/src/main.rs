//! nozbe - fetch Nozbe entity collections into timestamped JSON files.
//!
//! One run refreshes the access token, then fetches every entity type listed
//! in the configuration and writes each collection to the data directory.

mod cli;
mod config;
mod output;
mod sync;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use nozbe_core::EntityType;
use nozbe_core::traits::EntityApi;
use nozbe_file::FileHelper;
use nozbe_http::NozbeClient;

use cli::Cli;
use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging is configured here once; the library crates only emit events.
    init_logging(cli.verbose, cli.json_logs);

    let base_dir = cli.base_dir()?;
    let config_path = cli.config_path(&base_dir);
    let files = FileHelper::new();

    let config = AppConfig::load(&files, &config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    debug!(?config, "Configuration loaded");

    let client = NozbeClient::new(
        &files,
        &base_dir,
        &config.nozbe.credentials_file.directory,
        &config.nozbe.credentials_file.file_name,
        config.supported_entities(),
    )
    .context("Failed to create the API client")?;

    let entities: Vec<&str> = client
        .supported_entities()
        .iter()
        .map(EntityType::as_str)
        .collect();
    eprintln!("{}", "Syncing...".dimmed());
    output::field("Entities", &entities.join(", "));

    let report = sync::run_cycle(&client, &files, &config, &base_dir)
        .await
        .context("Sync aborted")?;

    output::report(&report);
    Ok(())
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
