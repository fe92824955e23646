//! Command-line interface for strictly_fifteen.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Fifteen - rule-checked sum-to-15 engine
#[derive(Parser, Debug)]
#[command(name = "strictly_fifteen")]
#[command(about = "Plays one side of sum-to-15 over a line-based board exchange", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML engine config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for the move selector (overrides the config)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Write logs to this file instead of stderr (overrides the config)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Read boards from stdin and answer each one
    Play,

    /// Evaluate a single board for a completed line
    Check {
        /// Comma-separated board, row-major
        #[arg(allow_hyphen_values = true)]
        board: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the winning lines in evaluation order
    Rules,
}
