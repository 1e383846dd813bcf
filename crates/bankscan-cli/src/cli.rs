//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bankscan - Turn bank statements into structured transactions
#[derive(Parser)]
#[command(name = "bankscan")]
#[command(about = "AI-powered bank statement extraction", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract transactions from a bank statement (PDF, PNG or JPEG)
    Extract {
        /// Statement file; if several are given only the first is processed
        files: Vec<PathBuf>,

        /// Write the CSV here instead of the dated default filename
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also copy the CSV to the clipboard
        #[arg(long)]
        copy: bool,

        /// Override the extraction model for this run
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Check extraction service configuration and availability
    Check,

    /// Print the extraction contract (system instruction and response schema)
    Contract,
}
