//! Move selection for the engine.
//!
//! One ply, no search. Lines are visited in rule order and only lines with
//! exactly one open cell can force a decision:
//!
//! 1. **Win**: the engine can complete the line now.
//! 2. **Block**: the opponent could complete it next turn, so the engine
//!    occupies the cell with a random number of its own.
//!
//! The first line that triggers either branch decides the move. If none
//! does, a random number goes into a random empty cell.

use super::action::Placement;
use super::rng::GameRng;
use super::rules::RuleSet;
use super::types::TARGET_SUM;
use super::{Board, NumberPool};
use tracing::{debug, info, instrument};

/// Whether `needed` could legally be placed by a side holding `pool`.
fn can_place(needed: i32, pool: &NumberPool, negative_used: bool) -> bool {
    pool.contains(needed.unsigned_abs()) && (needed > 0 || (needed < 0 && !negative_used))
}

/// Chooses the engine's next placement.
///
/// Returns `None` when there is no empty cell or the engine has no numbers
/// left.
#[instrument(skip_all, fields(negative_used = negative_used))]
pub fn select(
    board: &Board,
    rules: &RuleSet,
    my_pool: &NumberPool,
    their_pool: &NumberPool,
    negative_used: bool,
    rng: &mut GameRng,
) -> Option<Placement> {
    if my_pool.is_empty() || board.is_full() {
        info!(pool = my_pool.len(), "Nothing left to place");
        return None;
    }

    for rule in rules.rules() {
        let cells = rule.cells();
        let open: Vec<usize> = cells
            .iter()
            .copied()
            .filter(|&pos| board.is_open(pos))
            .collect();

        let [open_position] = open.as_slice() else {
            debug!(%rule, open = open.len(), "Skipping rule");
            continue;
        };

        let line_sum: i32 = cells.iter().filter_map(|&pos| board.get(pos)).sum();
        let needed = TARGET_SUM - line_sum;
        debug!(%rule, line_sum, needed, "Evaluating rule");

        if can_place(needed, my_pool, negative_used) {
            info!(value = needed, position = open_position, "Winning");
            return Some(Placement::new(needed, *open_position));
        }

        if can_place(needed, their_pool, negative_used) {
            // Spoil the cell with any of our numbers; the magnitude is not
            // matched to `needed`.
            let magnitude = *rng.choose(my_pool.numbers())? as i32;
            let value = if negative_used { magnitude } else { -magnitude };
            info!(value, position = open_position, "Denying win");
            return Some(Placement::new(value, *open_position));
        }
    }

    let open_cells = board.open_cells();
    let position = *rng.choose(&open_cells)?;
    let value = *rng.choose(my_pool.numbers())? as i32;
    debug!(value, position, "No forcing line, playing randomly");
    Some(Placement::new(value, position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::fifteen::Side;

    fn board(cells: [i32; 9]) -> Board {
        Board::from_cells(3, cells.to_vec()).unwrap()
    }

    #[test]
    fn test_negative_win_on_diagonal() {
        let board = board([9, 0, 0, 0, 7, 0, 0, 0, 0]);
        let mut rng = GameRng::new(0);
        let choice = select(
            &board,
            &RuleSet::standard(),
            &NumberPool::new(vec![1, 3, 5]),
            &Side::Even.pool(),
            false,
            &mut rng,
        );
        assert_eq!(choice, Some(Placement::new(-1, 8)));
    }

    #[test]
    fn test_positive_win_first_rule_in_order() {
        // Column (0,3,6) needs 5, row (0,1,2) needs 3; column comes first.
        let board = board([2, 4, 0, 8, 0, 0, 0, 0, 0]);
        let mut rng = GameRng::new(0);
        let choice = select(
            &board,
            &RuleSet::standard(),
            &Side::Odd.pool(),
            &NumberPool::new(vec![6]),
            false,
            &mut rng,
        );
        assert_eq!(choice, Some(Placement::new(5, 6)));
    }

    #[test]
    fn test_no_negative_win_once_spent() {
        let board = board([9, 0, 0, 0, 7, 0, 0, 0, 0]);
        let mut rng = GameRng::new(3);
        let my_pool = NumberPool::new(vec![1, 3, 5]);
        let choice = select(
            &board,
            &RuleSet::standard(),
            &my_pool,
            &Side::Even.pool(),
            true,
            &mut rng,
        )
        .unwrap();
        assert!(choice.value > 0);
        assert!(board.is_open(choice.position));
        assert!(my_pool.contains(choice.magnitude()));
    }

    #[test]
    fn test_block_uses_negative_when_available() {
        // Row (0,1,2): 9 + 0 + 4 needs 2, which only the opponent holds.
        let board = board([9, 0, 4, 0, 0, 0, 0, 0, 0]);
        let my_pool = NumberPool::new(vec![1, 3, 5, 7]);
        let mut rng = GameRng::new(11);
        let choice = select(
            &board,
            &RuleSet::standard(),
            &my_pool,
            &NumberPool::new(vec![2, 6, 8]),
            false,
            &mut rng,
        )
        .unwrap();
        assert_eq!(choice.position, 1);
        assert!(choice.value < 0);
        assert!(my_pool.contains(choice.magnitude()));
    }

    #[test]
    fn test_block_positive_after_negative_spent() {
        let board = board([9, 0, 4, 0, 0, 0, 0, 0, 0]);
        let my_pool = NumberPool::new(vec![1, 3, 5, 7]);
        let mut rng = GameRng::new(11);
        let choice = select(
            &board,
            &RuleSet::standard(),
            &my_pool,
            &NumberPool::new(vec![2, 6, 8]),
            true,
            &mut rng,
        )
        .unwrap();
        assert_eq!(choice.position, 1);
        assert!(choice.value > 0);
    }

    #[test]
    fn test_win_preferred_over_block_on_same_rule() {
        // Needed 3 is in both pools; the win branch fires first.
        let board = board([8, 4, 0, 0, 0, 0, 0, 0, 0]);
        let mut rng = GameRng::new(5);
        let choice = select(
            &board,
            &RuleSet::standard(),
            &NumberPool::new(vec![3]),
            &NumberPool::new(vec![3]),
            false,
            &mut rng,
        );
        assert_eq!(choice, Some(Placement::new(3, 2)));
    }

    #[test]
    fn test_fallback_on_empty_board() {
        let board = Board::new(3);
        let my_pool = Side::Odd.pool();
        let mut rng = GameRng::new(42);
        let choice = select(
            &board,
            &RuleSet::standard(),
            &my_pool,
            &Side::Even.pool(),
            false,
            &mut rng,
        )
        .unwrap();
        assert!(choice.value > 0);
        assert!(my_pool.contains(choice.magnitude()));
        assert!(choice.position < 9);
    }

    #[test]
    fn test_fallback_is_deterministic_per_seed() {
        let board = Board::new(3);
        let pick = |seed| {
            select(
                &board,
                &RuleSet::standard(),
                &Side::Odd.pool(),
                &Side::Even.pool(),
                false,
                &mut GameRng::new(seed),
            )
        };
        assert_eq!(pick(9), pick(9));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let board = board([2, 7, 6, 9, 1, 4, 3, 8, 5]);
        let mut rng = GameRng::new(1);
        let choice = select(
            &board,
            &RuleSet::standard(),
            &NumberPool::new(vec![1]),
            &NumberPool::default(),
            false,
            &mut rng,
        );
        assert_eq!(choice, None);
    }

    #[test]
    fn test_empty_pool_has_no_move() {
        let mut rng = GameRng::new(1);
        let choice = select(
            &Board::new(3),
            &RuleSet::standard(),
            &NumberPool::default(),
            &Side::Odd.pool(),
            false,
            &mut rng,
        );
        assert_eq!(choice, None);
    }
}
