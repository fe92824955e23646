//! Strictly Fifteen library - a rule-checked sum-to-15 engine
//!
//! The engine plays one side of a 3x3 number-placement game. Each turn it is
//! handed the whole board, checks the peer's move, looks for a completed
//! line and answers with a placement of its own.
//!
//! # Architecture
//!
//! - **Rules**: winning lines and terminal detection
//! - **Contracts**: preconditions for a single legal placement
//! - **Selector**: win-now, block, or random fallback
//! - **Session**: typestate phases driven one board at a time
//! - **Driver**: line-based text exchange with a peer
//!
//! # Example
//!
//! ```
//! use strictly_fifteen::{GameSession, Side};
//!
//! let mut session = GameSession::with_seed(7);
//! let report = session.submit_line("0,0,0,0,0,0,0,0,0").unwrap();
//! assert_eq!(report.side, Side::Odd);
//! assert_eq!(report.board.filled_count(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod driver;
mod engine_config;
mod games;

// Crate-level exports - Configuration
pub use engine_config::{ConfigError, EngineConfig};

// Crate-level exports - Line driver
pub use driver::run_lines;

// Crate-level exports - Game types (sum-to-15)
pub use games::fifteen::{
    Board, CellWasEmpty, Contract, DisjointPoolsInvariant, EVEN_NUMBERS, EngineMoveContract,
    FifteenInvariants, GameRng, GameSession, InputError, Invariant, InvariantSet,
    InvariantViolation, LegalPlacement, LineRule, MonotonicBoardInvariant, MoveError,
    NegativeAvailable, NumberInPool, NumberNotPlaced, NumberPool, ODD_NUMBERS, Outcome, Phase,
    Placement, Rejected, RuleSet, RuleSetError, STANDARD_LINES, SessionActive, SessionError,
    SessionFinished, SessionSetup, Side, SingleChange, SingleNegativeInvariant, TARGET_SUM,
    TerminalStatus, TurnReport, TurnResult, evaluate, parse_board, render_flat, render_grid,
    select, validate,
};
