//! Sum-to-15: a 3x3 number-placement game played as one automated side.
//!
//! The odd side places 1, 3, 5, 7, 9 and the even side 2, 4, 6, 8. Any line
//! of three positive numbers summing to 15 ends the game. Each game allows a
//! single negative placement, by either side.

mod action;
mod codec;
mod contracts;
mod invariants;
mod phases;
mod rng;
mod rules;
mod selector;
mod types;
mod typestate;
mod wrapper;

pub use action::{MoveError, Placement};
pub use codec::{InputError, parse_board, render_flat, render_grid};
pub use contracts::{
    CellWasEmpty, Contract, EngineMoveContract, LegalPlacement, NegativeAvailable, NumberInPool,
    NumberNotPlaced, SingleChange, validate,
};
pub use invariants::{
    DisjointPoolsInvariant, FifteenInvariants, Invariant, InvariantSet, InvariantViolation,
    MonotonicBoardInvariant, SingleNegativeInvariant,
};
pub use phases::Outcome;
pub use rng::GameRng;
pub use rules::{LineRule, RuleSet, RuleSetError, STANDARD_LINES, TerminalStatus, evaluate};
pub use selector::select;
pub use types::{Board, EVEN_NUMBERS, NumberPool, ODD_NUMBERS, Side, TARGET_SUM};
pub use typestate::{Rejected, SessionActive, SessionFinished, SessionSetup, TurnResult};
pub use wrapper::{GameSession, Phase, SessionError, TurnReport};
