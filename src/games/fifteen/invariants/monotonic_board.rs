//! Monotonic board invariant: cells never change once set.

use super::super::SessionActive;
use super::Invariant;

/// Invariant: the board equals the opening board plus the move history.
///
/// Every recorded placement must land on a cell that was empty at the time.
pub struct MonotonicBoardInvariant;

impl Invariant<SessionActive> for MonotonicBoardInvariant {
    fn holds(session: &SessionActive) -> bool {
        let mut reconstructed = session.opening().clone();

        for placement in session.history() {
            if !reconstructed.is_open(placement.position) {
                return false;
            }
            if reconstructed.set(placement.position, placement.value).is_err() {
                return false;
            }
        }

        reconstructed == *session.board()
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
