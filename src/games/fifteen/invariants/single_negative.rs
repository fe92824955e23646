//! Single negative invariant: one negative placement per game.

use super::super::SessionActive;
use super::Invariant;

/// Invariant: at most one recorded placement is negative, and if one is,
/// the negative allowance is marked spent.
pub struct SingleNegativeInvariant;

impl Invariant<SessionActive> for SingleNegativeInvariant {
    fn holds(session: &SessionActive) -> bool {
        let negatives = session
            .history()
            .iter()
            .filter(|p| p.is_negative())
            .count();

        negatives <= 1 && (negatives == 0 || session.negative_used())
    }

    fn description() -> &'static str {
        "At most one negative placement, and it marks the allowance spent"
    }
}
