//! How a session ended.

use super::rules::LineRule;
use serde::{Deserialize, Serialize};

/// Outcome of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The opponent's board completed a line.
    OpponentWon(LineRule),
    /// The engine's own placement completed a line.
    EngineWon(LineRule),
    /// The engine had nowhere to play (board full or pool spent).
    NoMoveAvailable,
}

impl Outcome {
    /// Returns the completed line, if the game was won.
    pub fn winning_line(&self) -> Option<LineRule> {
        match self {
            Outcome::OpponentWon(line) | Outcome::EngineWon(line) => Some(*line),
            Outcome::NoMoveAvailable => None,
        }
    }

    /// Returns true if someone completed a line.
    pub fn is_win(&self) -> bool {
        self.winning_line().is_some()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::OpponentWon(line) => write!(f, "Opponent completed line {}", line),
            Outcome::EngineWon(line) => write!(f, "Engine completed line {}", line),
            Outcome::NoMoveAvailable => write!(f, "No move available"),
        }
    }
}
