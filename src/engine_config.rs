//! Engine configuration loaded from TOML.

use crate::games::fifteen::{GameRng, LineRule, RuleSet};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Configuration for one engine process.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Side length of the square grid.
    #[serde(default = "default_grid_size")]
    grid_size: usize,

    /// Winning lines in evaluation order. Standard lines when absent.
    #[serde(default)]
    rules: Option<Vec<[usize; 3]>>,

    /// Seed for the move selector. Drawn from the OS when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Also write logs to this file.
    #[serde(default)]
    log_file: Option<PathBuf>,

    /// Prompt printed before reading each board.
    #[serde(default = "default_prompt")]
    prompt: String,
}

#[instrument]
fn default_grid_size() -> usize {
    3
}

#[instrument]
fn default_prompt() -> String {
    "Input: ".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            rules: None,
            seed: None,
            log_file: None,
            prompt: default_prompt(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(grid_size = config.grid_size, "Config loaded successfully");
        Ok(config)
    }

    /// Replaces the seed and log file when the command line sets them.
    #[instrument(skip(self))]
    pub fn apply_overrides(&mut self, seed: Option<u64>, log_file: Option<PathBuf>) {
        if seed.is_some() {
            self.seed = seed;
        }
        if log_file.is_some() {
            self.log_file = log_file;
        }
    }

    /// Builds the rule set for the configured grid.
    ///
    /// Without explicit rules only a 3x3 grid is supported.
    #[instrument(skip(self), fields(grid_size = self.grid_size))]
    pub fn rule_set(&self) -> Result<RuleSet, ConfigError> {
        match &self.rules {
            Some(rules) => {
                let lines = rules.iter().copied().map(LineRule::from).collect();
                RuleSet::new(self.grid_size, lines)
                    .map_err(|e| ConfigError::new(format!("Invalid rules: {}", e)))
            }
            None if self.grid_size == 3 => Ok(RuleSet::standard()),
            None => Err(ConfigError::new(format!(
                "A {0}x{0} grid needs explicit rules",
                self.grid_size
            ))),
        }
    }

    /// Builds the selector's generator from the configured seed.
    pub fn rng(&self) -> GameRng {
        self.seed.map(GameRng::new).unwrap_or_default()
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
