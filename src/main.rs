//! Beacon CLI entry point.

use anyhow::Result;
use clap::Parser;

use beacon::cli::{Cli, Commands};
use beacon::domain::models::Config;
use beacon::infrastructure::config::ConfigLoader;
use beacon::infrastructure::logging::LoggerImpl;

fn load_config(cli: &Cli) -> Result<Config> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => beacon::cli::handle_error(err, cli.json),
    };

    // Keeps the file writer flushing until exit
    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => beacon::cli::handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Inspect(args) => beacon::cli::commands::inspect::execute(args, cli.json).await,
        Commands::Watch(args) => {
            beacon::cli::commands::watch::execute(args, config, cli.json).await
        }
    };

    if let Err(err) = result {
        beacon::cli::handle_error(err, cli.json);
    }
}
