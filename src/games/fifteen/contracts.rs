//! Contract-based validation for sum-to-15.
//!
//! Opponent moves arrive as whole boards and are reduced to a single
//! [`Placement`] by [`validate`]. Engine moves are checked against the same
//! preconditions before they are committed.

use super::action::{MoveError, Placement};
use super::invariants::{FifteenInvariants, InvariantSet};
use super::typestate::SessionActive;
use super::{Board, NumberPool};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Placement Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: exactly one cell differs between two boards.
pub struct SingleChange;

impl SingleChange {
    /// Returns the index of the changed cell.
    #[instrument(skip_all)]
    pub fn check(previous: &Board, proposed: &Board) -> Result<usize, MoveError> {
        if previous.len() != proposed.len() {
            return Err(MoveError::SizeMismatch {
                expected: previous.len(),
                got: proposed.len(),
            });
        }

        let changed: Vec<usize> = previous
            .cells()
            .iter()
            .zip(proposed.cells())
            .enumerate()
            .filter(|(_, (old, new))| old != new)
            .map(|(i, _)| i)
            .collect();

        match changed.as_slice() {
            [] => Err(MoveError::NoMoveMade),
            [position] => Ok(*position),
            many => Err(MoveError::IllegalMultiChange(many.len())),
        }
    }
}

/// Precondition: the target cell was empty.
pub struct CellWasEmpty;

impl CellWasEmpty {
    #[instrument(skip(previous))]
    pub fn check(previous: &Board, position: usize) -> Result<(), MoveError> {
        if previous.is_open(position) {
            Ok(())
        } else {
            Err(MoveError::OverwriteAttempt { position })
        }
    }
}

/// Precondition: the magnitude is still in the mover's pool.
pub struct NumberInPool;

impl NumberInPool {
    #[instrument(skip(pool))]
    pub fn check(value: i32, pool: &NumberPool) -> Result<(), MoveError> {
        if pool.contains(value.unsigned_abs()) {
            Ok(())
        } else {
            Err(MoveError::NotYourNumber(value))
        }
    }
}

/// Precondition: a negative value needs the allowance to be unspent.
pub struct NegativeAvailable;

impl NegativeAvailable {
    #[instrument]
    pub fn check(value: i32, negative_used: bool) -> Result<(), MoveError> {
        if value < 0 && negative_used {
            Err(MoveError::NegativeAlreadyUsed)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the magnitude is not on the board yet.
pub struct NumberNotPlaced;

impl NumberNotPlaced {
    #[instrument(skip(previous))]
    pub fn check(value: i32, previous: &Board) -> Result<(), MoveError> {
        if previous.contains_magnitude(value.unsigned_abs()) {
            Err(MoveError::NumberAlreadyPlaced(value))
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for a single value dropped into an empty cell.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Checks a placement against the board, the mover's pool and the
    /// negative allowance, in that order.
    #[instrument(skip(previous, pool))]
    pub fn check(
        placement: &Placement,
        previous: &Board,
        pool: &NumberPool,
        negative_used: bool,
    ) -> Result<(), MoveError> {
        CellWasEmpty::check(previous, placement.position)?;
        NumberInPool::check(placement.value, pool)?;
        NegativeAvailable::check(placement.value, negative_used)?;
        NumberNotPlaced::check(placement.value, previous)?;
        Ok(())
    }

    /// Reduces a proposed board to the placement it makes, checking it.
    #[instrument(skip_all)]
    pub fn from_boards(
        previous: &Board,
        proposed: &Board,
        pool: &NumberPool,
        negative_used: bool,
    ) -> Result<Placement, MoveError> {
        let position = SingleChange::check(previous, proposed)?;
        let value = proposed.get(position).unwrap_or(0);
        let placement = Placement::new(value, position);
        Self::check(&placement, previous, pool, negative_used)?;
        Ok(placement)
    }
}

/// Validates the opponent's move and consumes its magnitude.
///
/// `opponent_pool` is the pool of the side the engine is *not* playing.
/// On success the magnitude is removed from it and the placement is
/// returned; [`Placement::magnitude`] is the consumed number. The board is
/// not committed here.
#[instrument(skip_all)]
pub fn validate(
    previous: &Board,
    proposed: &Board,
    opponent_pool: &mut NumberPool,
    negative_used: bool,
) -> Result<Placement, MoveError> {
    let placement = LegalPlacement::from_boards(previous, proposed, opponent_pool, negative_used)
        .inspect_err(|e| warn!(error = %e, "Not a valid move"))?;
    opponent_pool.remove(placement.magnitude());
    Ok(placement)
}

// ─────────────────────────────────────────────────────────────
//  Engine Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for the engine's own placements.
///
/// Preconditions:
/// - Cell is empty
/// - Magnitude is in the engine's pool
/// - Negative allowance is respected
/// - Magnitude not already on the board
///
/// Postconditions:
/// - Exactly one more cell is filled, earlier cells untouched
/// - All session invariants hold
pub struct EngineMoveContract;

impl Contract<SessionActive, Placement> for EngineMoveContract {
    fn pre(session: &SessionActive, placement: &Placement) -> Result<(), MoveError> {
        LegalPlacement::check(
            placement,
            session.board(),
            session.my_pool(),
            session.negative_used(),
        )
    }

    fn post(before: &SessionActive, after: &SessionActive) -> Result<(), MoveError> {
        let appended = after.board().filled_count() == before.board().filled_count() + 1
            && before
                .board()
                .cells()
                .iter()
                .zip(after.board().cells())
                .all(|(old, new)| *old == 0 || old == new);
        if !appended {
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: board is not append-only".to_string(),
            ));
        }

        FifteenInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::fifteen::Side;

    fn board(cells: [i32; 9]) -> Board {
        Board::from_cells(3, cells.to_vec()).unwrap()
    }

    #[test]
    fn test_valid_move_consumes_number() {
        let previous = board([0, 9, 0, 0, 0, 0, 0, 0, 0]);
        let proposed = board([4, 9, 0, 0, 0, 0, 0, 0, 0]);
        let mut pool = Side::Even.pool();

        assert_eq!(
            validate(&previous, &proposed, &mut pool, false),
            Ok(Placement::new(4, 0))
        );
        assert!(!pool.contains(4));
    }

    #[test]
    fn test_no_move_made() {
        let previous = board([0, 9, 0, 0, 0, 0, 0, 0, 0]);
        let mut pool = Side::Even.pool();
        assert_eq!(
            validate(&previous, &previous.clone(), &mut pool, false),
            Err(MoveError::NoMoveMade)
        );
    }

    #[test]
    fn test_multi_change() {
        let previous = board([0; 9]);
        let proposed = board([2, 4, 0, 0, 0, 0, 0, 0, 0]);
        let mut pool = Side::Even.pool();
        assert_eq!(
            validate(&previous, &proposed, &mut pool, false),
            Err(MoveError::IllegalMultiChange(2))
        );
    }

    #[test]
    fn test_overwrite() {
        let previous = board([0, 9, 0, 0, 0, 0, 0, 0, 0]);
        let proposed = board([0, 2, 0, 0, 0, 0, 0, 0, 0]);
        let mut pool = Side::Even.pool();
        assert_eq!(
            validate(&previous, &proposed, &mut pool, false),
            Err(MoveError::OverwriteAttempt { position: 1 })
        );
    }

    #[test]
    fn test_wrong_parity() {
        let previous = board([0, 9, 0, 0, 0, 0, 0, 0, 0]);
        let proposed = board([5, 9, 0, 0, 0, 0, 0, 0, 0]);
        let mut pool = Side::Even.pool();
        assert_eq!(
            validate(&previous, &proposed, &mut pool, false),
            Err(MoveError::NotYourNumber(5))
        );
        assert_eq!(pool, Side::Even.pool());
    }

    #[test]
    fn test_second_negative() {
        let previous = board([0, -9, 0, 0, 0, 0, 0, 0, 0]);
        let proposed = board([-2, -9, 0, 0, 0, 0, 0, 0, 0]);
        let mut pool = Side::Even.pool();
        assert_eq!(
            validate(&previous, &proposed, &mut pool, true),
            Err(MoveError::NegativeAlreadyUsed)
        );
    }

    #[test]
    fn test_number_already_placed() {
        // Pool still holds 6 even though it is on the board.
        let previous = board([0, 6, 0, 0, 0, 0, 0, 0, 0]);
        let proposed = board([-6, 6, 0, 0, 0, 0, 0, 0, 0]);
        let mut pool = Side::Even.pool();
        assert_eq!(
            validate(&previous, &proposed, &mut pool, false),
            Err(MoveError::NumberAlreadyPlaced(-6))
        );
    }

    #[test]
    fn test_size_mismatch() {
        let previous = board([0; 9]);
        let proposed = Board::new(4);
        let mut pool = Side::Even.pool();
        assert_eq!(
            validate(&previous, &proposed, &mut pool, false),
            Err(MoveError::SizeMismatch {
                expected: 9,
                got: 16
            })
        );
    }

    #[test]
    fn test_checks_run_in_order() {
        // Overwrite wins over wrong parity.
        let previous = board([0, 9, 0, 0, 0, 0, 0, 0, 0]);
        let proposed = board([0, 7, 0, 0, 0, 0, 0, 0, 0]);
        let mut pool = Side::Even.pool();
        assert!(matches!(
            validate(&previous, &proposed, &mut pool, false),
            Err(MoveError::OverwriteAttempt { .. })
        ));
    }
}
