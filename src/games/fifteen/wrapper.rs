//! Session wrapper that drives the typestate phases one board at a time.

use super::action::{MoveError, Placement};
use super::codec::{InputError, parse_board};
use super::phases::Outcome;
use super::rng::GameRng;
use super::rules::RuleSet;
use super::typestate::{Rejected, SessionActive, SessionFinished, SessionSetup, TurnResult};
use super::{Board, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Current phase of a session.
///
/// Typestate phases can't share one variable, so this enum holds whichever
/// one is live.
#[derive(Debug, Clone)]
pub enum Phase {
    /// No board has been set up yet.
    Uninitialized,
    /// Waiting for the first board to learn which side the engine plays.
    SideUnknown(SessionSetup),
    /// Side known, exchanging boards.
    Active(SessionActive),
    /// Game over. Absorbing.
    Terminal(SessionFinished),
}

/// Why a submitted board did not produce a turn.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    /// The input line could not be read as a board.
    #[display("Malformed input: {}", _0)]
    #[from]
    Input(InputError),
    /// The board was read but the move it makes is illegal.
    #[display("Not a valid move: {}", _0)]
    #[from]
    Rejected(MoveError),
    /// The session has ended and accepts no more moves.
    #[display("Game is already over")]
    GameOver,
    /// The session was never reset.
    #[display("Session is not initialized")]
    Uninitialized,
}

/// What a successful turn handed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Board after the engine's reply.
    pub board: Board,
    /// Side the engine plays.
    pub side: Side,
    /// The engine's placement this turn, if it made one.
    pub engine_move: Option<Placement>,
    /// Set when this turn ended the game.
    pub outcome: Option<Outcome>,
}

/// One game against one peer, fed a board per turn.
#[derive(Debug, Clone)]
pub struct GameSession {
    rules: RuleSet,
    rng: GameRng,
    phase: Phase,
}

impl GameSession {
    /// Creates a session ready for its first board.
    #[instrument(skip_all, fields(rules = rules.rules().len(), seed = rng.seed()))]
    pub fn new(rules: RuleSet, rng: GameRng) -> Self {
        let mut session = Self {
            rules,
            rng,
            phase: Phase::Uninitialized,
        };
        session.reset();
        session
    }

    /// Creates a session on the standard 3x3 rules with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(RuleSet::standard(), GameRng::new(seed))
    }

    /// Forgets the board, side and pools and waits for a new first board.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!("Resetting session");
        let setup = match std::mem::replace(&mut self.phase, Phase::Uninitialized) {
            Phase::Terminal(done) => done.restart(),
            _ => SessionSetup::new(self.rules.side_len()),
        };
        self.phase = Phase::SideUnknown(setup);
    }

    /// Parses a line and submits it as the peer's board.
    #[instrument(skip(self))]
    pub fn submit_line(&mut self, line: &str) -> Result<TurnReport, SessionError> {
        let board = parse_board(line, self.rules.side_len())
            .inspect_err(|e| warn!(error = %e, "Rejecting input line"))?;
        self.submit(board)
    }

    /// Submits the peer's board and returns the engine's answer.
    ///
    /// A rejected board leaves the session exactly as it was.
    #[instrument(skip_all)]
    pub fn submit(&mut self, proposed: Board) -> Result<TurnReport, SessionError> {
        let phase = std::mem::replace(&mut self.phase, Phase::Uninitialized);

        let (phase, result) = match phase {
            Phase::Uninitialized => (Phase::Uninitialized, Err(SessionError::Uninitialized)),
            Phase::SideUnknown(setup) => settle(
                setup.begin(proposed, &self.rules, &mut self.rng),
                Phase::SideUnknown,
            ),
            Phase::Active(session) => settle(
                session.play(proposed, &self.rules, &mut self.rng),
                Phase::Active,
            ),
            Phase::Terminal(done) => (Phase::Terminal(done), Err(SessionError::GameOver)),
        };

        self.phase = phase;
        result
    }

    /// Returns the live phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns the rules the session was built with.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the committed board, if a session is set up.
    pub fn board(&self) -> Option<&Board> {
        match &self.phase {
            Phase::Uninitialized => None,
            Phase::SideUnknown(setup) => Some(setup.board()),
            Phase::Active(session) => Some(session.board()),
            Phase::Terminal(done) => Some(done.board()),
        }
    }

    /// Side the engine plays, once inferred.
    pub fn side(&self) -> Option<Side> {
        match &self.phase {
            Phase::Active(session) => Some(session.side()),
            Phase::Terminal(done) => Some(done.side()),
            Phase::Uninitialized | Phase::SideUnknown(_) => None,
        }
    }

    /// Returns the outcome, if the game is over.
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.phase {
            Phase::Terminal(done) => Some(done.outcome()),
            _ => None,
        }
    }

    /// Returns true if the game is over.
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Terminal(_))
    }

    /// Returns a status string for display.
    pub fn status_string(&self) -> String {
        match &self.phase {
            Phase::Uninitialized => "Not initialized".to_string(),
            Phase::SideUnknown(_) => "Waiting for the first board".to_string(),
            Phase::Active(session) => {
                format!("In progress. Playing {} numbers.", session.side())
            }
            Phase::Terminal(done) => format!("Game over. {}", done.outcome()),
        }
    }
}

/// Folds a typestate transition back into a phase and a report.
fn settle<S>(
    result: Result<TurnResult, Rejected<S>>,
    restore: fn(S) -> Phase,
) -> (Phase, Result<TurnReport, SessionError>) {
    match result {
        Ok(TurnResult::Continue(session, placement)) => {
            let report = TurnReport {
                board: session.board().clone(),
                side: session.side(),
                engine_move: Some(placement),
                outcome: None,
            };
            (Phase::Active(session), Ok(report))
        }
        Ok(TurnResult::Finished(done)) => {
            debug!(placements = done.history().len(), "Turn ended the game");
            let report = TurnReport {
                board: done.board().clone(),
                side: done.side(),
                engine_move: done.engine_move(),
                outcome: Some(*done.outcome()),
            };
            (Phase::Terminal(done), Ok(report))
        }
        Err(rejected) => (
            restore(rejected.session),
            Err(SessionError::Rejected(rejected.error)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::fifteen::LineRule;

    #[test]
    fn test_new_session_waits_for_side() {
        let session = GameSession::with_seed(0);
        assert!(matches!(session.phase(), Phase::SideUnknown(_)));
        assert_eq!(session.side(), None);
        assert_eq!(session.board(), Some(&Board::new(3)));
    }

    #[test]
    fn test_malformed_line_keeps_phase() {
        let mut session = GameSession::with_seed(0);
        let err = session.submit_line("1,2").unwrap_err();
        assert!(matches!(err, SessionError::Input(_)));
        assert!(matches!(session.phase(), Phase::SideUnknown(_)));
    }

    #[test]
    fn test_first_line_sets_side() {
        let mut session = GameSession::with_seed(4);
        let report = session.submit_line("0,0,0,0,0,0,0,0,0").unwrap();
        assert_eq!(report.side, Side::Odd);
        assert_eq!(report.board.filled_count(), 1);
        assert_eq!(session.side(), Some(Side::Odd));
        assert!(session.status_string().contains("odd"));
    }

    #[test]
    fn test_reset_forgets_side() {
        let mut session = GameSession::with_seed(4);
        session.submit_line("0,0,0,0,0,0,0,0,0").unwrap();
        session.reset();
        assert_eq!(session.side(), None);
        let report = session.submit_line("0,0,0,0,5,0,0,0,0").unwrap();
        assert_eq!(report.side, Side::Even);
    }

    /// Opens with 9 in the corner on a diagonal-only rule set and returns
    /// the first seeded session whose reply can finish the diagonal.
    fn diagonal_setup() -> (GameSession, i32) {
        let rules = RuleSet::new(3, vec![LineRule::new(0, 4, 8)]).unwrap();
        (0..10_000)
            .find_map(|seed| {
                let mut session = GameSession::new(rules.clone(), GameRng::new(seed));
                let reply = session.submit_line("9,0,0,0,0,0,0,0,0").ok()?.engine_move?;
                (reply.position == 4 && matches!(reply.value, 2 | 4))
                    .then_some((session, reply.value))
            })
            .expect("a seed that plays the centre")
    }

    #[test]
    fn test_opening_is_validated() {
        let mut session = GameSession::with_seed(0);
        assert_eq!(
            session.submit_line("2,0,0,0,0,0,0,0,0"),
            Err(SessionError::Rejected(MoveError::NotYourNumber(2)))
        );
        assert!(matches!(session.phase(), Phase::SideUnknown(_)));
    }

    #[test]
    fn test_terminal_is_absorbing() {
        let (mut session, centre) = diagonal_setup();
        let report = session
            .submit_line(&format!("9,1,0,0,{},0,0,0,0", centre))
            .unwrap();
        assert_eq!(
            report.outcome,
            Some(Outcome::EngineWon(LineRule::new(0, 4, 8)))
        );
        assert!(session.is_over());
        assert!(session.status_string().starts_with("Game over"));
        assert_eq!(
            session.submit_line("9,1,3,0,0,0,0,0,0"),
            Err(SessionError::GameOver)
        );

        session.reset();
        assert!(matches!(session.phase(), Phase::SideUnknown(_)));
    }
}
