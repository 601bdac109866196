//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::inspect::InspectArgs;
use crate::cli::commands::watch::WatchArgs;

#[derive(Parser)]
#[command(name = "beacon")]
#[command(about = "Beacon - trust scoring and proactive context suggestions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .beacon/config.yaml and .beacon/local.yaml)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score the observability section of a saved response
    Inspect(InspectArgs),
    /// Poll for context suggestions and print render events until Ctrl-C
    Watch(WatchArgs),
}
