//! Strictly Fifteen - command-line engine
//!
//! Reads boards line by line and answers each with the engine's move.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use std::sync::Mutex;
use strictly_fifteen::{EngineConfig, GameSession, evaluate, parse_board, render_grid, run_lines};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    config.apply_overrides(cli.seed, cli.log_file.clone());

    initialize_tracing(config.log_file().as_deref())?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_play(&config),
        Command::Check { board, json } => run_check(&config, &board, json),
        Command::Rules => run_rules(&config),
    }
}

/// Installs the subscriber, writing to a file when one is configured.
fn initialize_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

/// Play one game over stdin/stdout.
#[instrument(skip_all)]
fn run_play(config: &EngineConfig) -> Result<()> {
    let rules = config.rule_set()?;
    let mut session = GameSession::new(rules, config.rng());

    let stdin = std::io::stdin();
    let outcome = run_lines(&mut session, config.prompt(), stdin.lock(), std::io::stdout())?;
    info!(?outcome, "Exiting");
    Ok(())
}

/// Evaluate one board and print whether it is finished.
#[instrument(skip(config))]
fn run_check(config: &EngineConfig, board: &str, json: bool) -> Result<()> {
    let rules = config.rule_set()?;
    let board = parse_board(board, rules.side_len())?;
    let status = evaluate(&board, &rules);

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("{}", render_grid(&board));
        match status.winning_line {
            Some(line) => println!("Game over: line {} sums to 15", line),
            None => println!("No completed line"),
        }
        println!("Negative seen: {}", status.negative_seen);
    }
    Ok(())
}

/// Print the configured winning lines.
#[instrument(skip(config))]
fn run_rules(config: &EngineConfig) -> Result<()> {
    let rules = config.rule_set()?;
    println!("Grid: {0}x{0}", rules.side_len());
    for (i, rule) in rules.rules().iter().enumerate() {
        println!("{:>2}: {}", i, rule);
    }
    Ok(())
}
