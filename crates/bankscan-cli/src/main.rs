//! Bankscan CLI - AI bank statement extraction
//!
//! Usage:
//!   bankscan extract statement.pdf   Extract transactions and export CSV
//!   bankscan check                   Check service configuration
//!   bankscan contract                Print the extraction contract

mod cli;
mod clipboard;
mod commands;
mod render;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Extract {
            files,
            output,
            copy,
            model,
        } => commands::cmd_extract(&files, output.as_deref(), copy, model.as_deref()).await,
        Commands::Check => commands::cmd_check().await,
        Commands::Contract => commands::cmd_contract(),
    }
}
