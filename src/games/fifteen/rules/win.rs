//! Terminal detection for sum-to-15.

use super::super::types::TARGET_SUM;
use super::super::Board;
use super::{LineRule, RuleSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Result of scanning the board for a finished line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TerminalStatus {
    /// A line of three positive values sums to the target.
    pub game_over: bool,
    /// A negative value was seen in some line's cells.
    pub negative_seen: bool,
    /// The first completed line in rule order.
    pub winning_line: Option<LineRule>,
}

/// Scans every rule in order.
///
/// Stops at the first line whose three cells are all positive and sum to
/// exactly 15. Negatives seen before that point set `negative_seen`.
#[instrument(skip(rules))]
pub fn evaluate(board: &Board, rules: &RuleSet) -> TerminalStatus {
    let mut status = TerminalStatus::default();

    for rule in rules.rules() {
        let [a, b, c] = rule.cells().map(|pos| board.get(pos).unwrap_or(0));

        if a < 0 || b < 0 || c < 0 {
            status.negative_seen = true;
        }

        if a > 0 && b > 0 && c > 0 && a + b + c == TARGET_SUM {
            info!(%rule, a, b, c, "Game is over. {} + {} + {} = {}", a, b, c, TARGET_SUM);
            status.game_over = true;
            status.winning_line = Some(*rule);
            return status;
        }
    }

    debug!(negative_seen = status.negative_seen, "No completed line");
    status
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(cells: [i32; 9]) -> Board {
        Board::from_cells(3, cells.to_vec()).unwrap()
    }

    #[test]
    fn test_empty_board_not_over() {
        let status = evaluate(&Board::new(3), &RuleSet::standard());
        assert_eq!(status, TerminalStatus::default());
    }

    #[test]
    fn test_row_sum_fifteen() {
        let status = evaluate(&board([0, 0, 0, 2, 9, 4, 0, 0, 0]), &RuleSet::standard());
        assert!(status.game_over);
        assert_eq!(status.winning_line, Some(LineRule::new(3, 4, 5)));
    }

    #[test]
    fn test_diagonal_sum_fifteen() {
        let status = evaluate(&board([8, 0, 0, 0, 5, 0, 0, 0, 2]), &RuleSet::standard());
        assert!(status.game_over);
        assert_eq!(status.winning_line, Some(LineRule::new(0, 4, 8)));
    }

    #[test]
    fn test_negative_line_never_wins() {
        // 9 + 7 - 1 = 15, but only all-positive lines count.
        let status = evaluate(&board([9, 0, 0, 0, 7, 0, 0, 0, -1]), &RuleSet::standard());
        assert!(!status.game_over);
        assert!(status.negative_seen);
    }

    #[test]
    fn test_wrong_sum_not_over() {
        let status = evaluate(&board([1, 3, 5, 0, 0, 0, 0, 0, 0]), &RuleSet::standard());
        assert!(!status.game_over);
        assert!(!status.negative_seen);
    }
}
