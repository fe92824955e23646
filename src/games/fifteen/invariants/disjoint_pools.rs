//! Disjoint pools invariant: every magnitude is spent at most once.

use super::super::SessionActive;
use super::Invariant;

/// Invariant: the two pools never share a magnitude, and nothing on the
/// board is still waiting in a pool.
pub struct DisjointPoolsInvariant;

impl Invariant<SessionActive> for DisjointPoolsInvariant {
    fn holds(session: &SessionActive) -> bool {
        let mine = session.my_pool();
        let theirs = session.their_pool();

        mine.is_disjoint(theirs)
            && session
                .board()
                .cells()
                .iter()
                .filter(|v| **v != 0)
                .all(|v| !mine.contains(v.unsigned_abs()) && !theirs.contains(v.unsigned_abs()))
    }

    fn description() -> &'static str {
        "Pools are disjoint and placed numbers are spent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::fifteen::{Board, GameRng, RuleSet, SessionSetup, TurnResult};

    #[test]
    fn test_opening_holds_for_both_sides() {
        let boards = [
            Board::new(3),
            Board::from_cells(3, vec![7, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap(),
        ];
        for first in boards {
            let mut rng = GameRng::new(21);
            match SessionSetup::new(3)
                .begin(first, &RuleSet::standard(), &mut rng)
                .expect("valid opening")
            {
                TurnResult::Continue(session, _) => {
                    assert!(DisjointPoolsInvariant::holds(&session));
                }
                TurnResult::Finished(_) => panic!("Expected in-progress session"),
            }
        }
    }
}
