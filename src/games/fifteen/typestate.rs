//! Phase-specific typestate structs for a sum-to-15 session.
//!
//! Each phase is its own type. A `SessionSetup` does not know its side yet,
//! a `SessionActive` always does, and a `SessionFinished` always carries an
//! outcome. Side inference happens exactly once, in
//! [`SessionSetup::begin`], because nothing else can produce a
//! `SessionActive`.

use super::action::{MoveError, Placement};
use super::contracts::{Contract, EngineMoveContract, validate};
use super::phases::Outcome;
use super::rng::GameRng;
use super::rules::{RuleSet, evaluate};
use super::selector::select;
use super::{Board, NumberPool, Side};
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Rejection
// ─────────────────────────────────────────────────────────────

/// A turn that was refused, handing back the untouched session.
#[derive(Debug, Clone)]
pub struct Rejected<S> {
    /// Session as it was before the turn.
    pub session: S,
    /// Why the turn was refused.
    pub error: MoveError,
}

impl<S> Rejected<S> {
    fn new(session: S, error: MoveError) -> Self {
        Self { session, error }
    }
}

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Session waiting for its first board.
///
/// The side is unknown and the board is empty.
#[derive(Debug, Clone)]
pub struct SessionSetup {
    board: Board,
}

impl SessionSetup {
    /// Creates a session for a `side_len` x `side_len` grid.
    #[instrument]
    pub fn new(side_len: usize) -> Self {
        Self {
            board: Board::new(side_len),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Accepts the first board, infers the side and answers it.
    ///
    /// An all-zero board means the engine opens and needs no checks. Any
    /// other first board is the opponent's opening move and is validated
    /// against the empty board like every later move.
    #[instrument(skip_all)]
    pub fn begin(
        self,
        first: Board,
        rules: &RuleSet,
        rng: &mut GameRng,
    ) -> Result<TurnResult, Rejected<SessionSetup>> {
        if first.len() != self.board.len() {
            let error = MoveError::SizeMismatch {
                expected: self.board.len(),
                got: first.len(),
            };
            warn!(error = %error, "Rejecting opening board");
            return Err(Rejected::new(self, error));
        }

        let side = Side::infer(&first);
        let mut their_pool = side.opponent().pool();
        let mut history = Vec::new();

        if side == Side::Even {
            let placement = match validate(&self.board, &first, &mut their_pool, false) {
                Ok(placement) => placement,
                Err(error) => return Err(Rejected::new(self, error)),
            };
            debug!(%placement, "Opening move accepted");
            history.push(placement);
        }
        info!(%side, "Looks like we're playing as {}", side);

        let session = SessionActive {
            side,
            opening: self.board.clone(),
            negative_used: history.iter().any(Placement::is_negative),
            board: first,
            history,
            my_pool: side.pool(),
            their_pool,
        };

        let before = self;
        session
            .respond(rules, rng)
            .map_err(|error| Rejected::new(before, error))
    }
}

// ─────────────────────────────────────────────────────────────
//  Active Phase
// ─────────────────────────────────────────────────────────────

/// Session with a known side, accepting opponent boards.
#[derive(Debug, Clone)]
pub struct SessionActive {
    pub(super) side: Side,
    pub(super) opening: Board,
    pub(super) board: Board,
    pub(super) history: Vec<Placement>,
    pub(super) my_pool: NumberPool,
    pub(super) their_pool: NumberPool,
    pub(super) negative_used: bool,
}

impl SessionActive {
    /// Validates the opponent's board, commits it and answers it.
    ///
    /// On rejection the session is handed back exactly as it was.
    #[instrument(skip_all, fields(side = %self.side))]
    pub fn play(
        self,
        proposed: Board,
        rules: &RuleSet,
        rng: &mut GameRng,
    ) -> Result<TurnResult, Rejected<SessionActive>> {
        let before = self.clone();
        let mut session = self;

        let placement = match validate(
            &session.board,
            &proposed,
            &mut session.their_pool,
            session.negative_used,
        ) {
            Ok(placement) => placement,
            Err(error) => return Err(Rejected::new(before, error)),
        };
        debug!(%placement, "Opponent move accepted");

        session.board = proposed;
        session.history.push(placement);
        if placement.is_negative() {
            session.negative_used = true;
        }

        session
            .respond(rules, rng)
            .map_err(|error| Rejected::new(before, error))
    }

    /// Checks the committed board, then picks, checks and commits the
    /// engine's placement.
    fn respond(mut self, rules: &RuleSet, rng: &mut GameRng) -> Result<TurnResult, MoveError> {
        let status = evaluate(&self.board, rules);
        self.negative_used |= status.negative_seen;
        if let Some(line) = status.winning_line {
            return Ok(TurnResult::Finished(
                self.finish(Outcome::OpponentWon(line), None),
            ));
        }

        info!("Thinking of a move...");
        let Some(placement) = select(
            &self.board,
            rules,
            &self.my_pool,
            &self.their_pool,
            self.negative_used,
            rng,
        ) else {
            info!(full = self.board.is_full(), "No move left to make");
            return Ok(TurnResult::Finished(
                self.finish(Outcome::NoMoveAvailable, None),
            ));
        };

        EngineMoveContract::pre(&self, &placement)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board
            .set(placement.position, placement.value)
            .map_err(|e| MoveError::InvariantViolation(e.to_string()))?;
        self.my_pool.remove(placement.magnitude());
        if placement.is_negative() {
            self.negative_used = true;
        }
        self.history.push(placement);

        #[cfg(debug_assertions)]
        EngineMoveContract::post(&before, &self)?;

        let status = evaluate(&self.board, rules);
        self.negative_used |= status.negative_seen;
        if let Some(line) = status.winning_line {
            return Ok(TurnResult::Finished(
                self.finish(Outcome::EngineWon(line), Some(placement)),
            ));
        }

        Ok(TurnResult::Continue(self, placement))
    }

    fn finish(self, outcome: Outcome, engine_move: Option<Placement>) -> SessionFinished {
        info!(%outcome, "Session finished");
        SessionFinished {
            side: self.side,
            board: self.board,
            history: self.history,
            outcome,
            engine_move,
        }
    }

    /// Side the engine plays.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Returns the committed board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board as first received, before any recorded placement.
    pub fn opening(&self) -> &Board {
        &self.opening
    }

    /// Placements accepted since the opening board.
    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    /// Magnitudes the engine can still place.
    pub fn my_pool(&self) -> &NumberPool {
        &self.my_pool
    }

    /// Magnitudes the opponent can still place.
    pub fn their_pool(&self) -> &NumberPool {
        &self.their_pool
    }

    /// Whether the one negative placement has been spent.
    pub fn negative_used(&self) -> bool {
        self.negative_used
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Session over, outcome determined.
#[derive(Debug, Clone)]
pub struct SessionFinished {
    side: Side,
    board: Board,
    history: Vec<Placement>,
    outcome: Outcome,
    engine_move: Option<Placement>,
}

impl SessionFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Side the engine played.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Returns the final board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the placement history.
    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    /// The engine's placement on the final turn, if it made one.
    pub fn engine_move(&self) -> Option<Placement> {
        self.engine_move
    }

    /// Starts over on a fresh board of the same size.
    #[instrument(skip(self))]
    pub fn restart(self) -> SessionSetup {
        SessionSetup::new(self.board.side_len())
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of a successful turn.
#[derive(Debug)]
pub enum TurnResult {
    /// Session continues; carries the engine's placement.
    Continue(SessionActive, Placement),
    /// Session finished.
    Finished(SessionFinished),
}
