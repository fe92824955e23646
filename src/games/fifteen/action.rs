//! First-class action types for the sum-to-15 game.
//!
//! A placement is a domain event: a signed value dropped into one cell.
//! It can be validated before it is applied and kept in history afterwards.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A single value placed at a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Signed value written into the cell.
    pub value: i32,
    /// Row-major cell index.
    pub position: usize,
}

impl Placement {
    /// Creates a new placement.
    #[instrument]
    pub fn new(value: i32, position: usize) -> Self {
        Self { value, position }
    }

    /// Returns the unsigned magnitude consumed from a pool.
    pub fn magnitude(&self) -> u32 {
        self.value.unsigned_abs()
    }

    /// Returns true if this placement spends the negative allowance.
    pub fn is_negative(&self) -> bool {
        self.value < 0
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.value, self.position)
    }
}

/// Reason a proposed board was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The proposed board has a different number of cells.
    #[display("Board state size is wrong: expected={}, got={}", expected, got)]
    SizeMismatch {
        /// Cells on the current board.
        expected: usize,
        /// Cells on the proposed board.
        got: usize,
    },

    /// More than one cell changed.
    #[display("Illegal number of changes: {}", _0)]
    IllegalMultiChange(#[error(not(source))] usize),

    /// Nothing changed.
    #[display("No move was made")]
    NoMoveMade,

    /// The changed cell already held a value.
    #[display("Illegally trying to change an existing space at {}", position)]
    OverwriteAttempt {
        /// Cell that was already occupied.
        position: usize,
    },

    /// The magnitude is not in the mover's remaining pool.
    #[display("Using a number ({}) that isn't theirs", _0)]
    NotYourNumber(#[error(not(source))] i32),

    /// The one negative placement has already been spent.
    #[display("Negative has already been used")]
    NegativeAlreadyUsed,

    /// The magnitude is already somewhere on the board.
    #[display("Using a number ({}) that's already been placed", _0)]
    NumberAlreadyPlaced(#[error(not(source))] i32),

    /// A postcondition failed after applying a move.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}
