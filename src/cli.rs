//! CLI interface for Steward
//!
//! This module provides the command-line interface using clap's derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Steward Agent Gateway
///
/// Plans tool invocations from natural-language queries with an LLM, runs
/// them against remote property-management tools, and aggregates the results.
#[derive(Parser, Debug)]
#[command(name = "steward")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    /// Specify alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP gateway
    Serve {
        /// Override the configured listen port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Plan and run a single query, printing the aggregate as JSON
    Run {
        /// The natural-language query
        query: String,
    },
}
