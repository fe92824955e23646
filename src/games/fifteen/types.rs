//! Core domain types for the sum-to-15 game.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Magnitudes owned by the side that moves first.
pub const ODD_NUMBERS: [u32; 5] = [1, 3, 5, 7, 9];

/// Magnitudes owned by the side that moves second.
pub const EVEN_NUMBERS: [u32; 4] = [2, 4, 6, 8];

/// Target sum for a winning line.
pub const TARGET_SUM: i32 = 15;

/// Which side of the game a player is on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// Moves first, places odd numbers.
    Odd,
    /// Moves second, places even numbers.
    Even,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Odd => Side::Even,
            Side::Even => Side::Odd,
        }
    }

    /// Infers the engine's side from the first board it is shown.
    ///
    /// An untouched board means nobody has moved yet, so the engine opens.
    pub fn infer(first_board: &Board) -> Self {
        if first_board.cells().iter().all(|&v| v == 0) {
            Side::Odd
        } else {
            Side::Even
        }
    }

    /// Returns the full set of magnitudes this side starts with.
    pub fn numbers(self) -> &'static [u32] {
        match self {
            Side::Odd => &ODD_NUMBERS,
            Side::Even => &EVEN_NUMBERS,
        }
    }

    /// Returns a fresh pool holding every magnitude of this side.
    pub fn pool(self) -> NumberPool {
        NumberPool::new(self.numbers().to_vec())
    }
}

/// Magnitudes a side has not yet placed.
///
/// Insertion order is kept so seeded random draws are reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_new::new)]
pub struct NumberPool {
    numbers: Vec<u32>,
}

impl NumberPool {
    /// Returns true if the magnitude is still available.
    pub fn contains(&self, magnitude: u32) -> bool {
        self.numbers.contains(&magnitude)
    }

    /// Removes a magnitude, returning whether it was present.
    #[instrument(skip(self))]
    pub fn remove(&mut self, magnitude: u32) -> bool {
        match self.numbers.iter().position(|&n| n == magnitude) {
            Some(idx) => {
                self.numbers.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Returns the remaining magnitudes in order.
    pub fn numbers(&self) -> &[u32] {
        &self.numbers
    }

    /// Number of magnitudes left.
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Returns true once every magnitude has been placed.
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Returns true if no magnitude appears in both pools.
    pub fn is_disjoint(&self, other: &NumberPool) -> bool {
        self.numbers.iter().all(|n| !other.contains(*n))
    }
}

/// Square board of signed cells in row-major order.
///
/// Zero marks an empty cell. A negative value is the one negative
/// placement allowed per game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    side_len: usize,
    cells: Vec<i32>,
}

impl Board {
    /// Creates an empty board with `side_len * side_len` cells.
    pub fn new(side_len: usize) -> Self {
        Self {
            side_len,
            cells: vec![0; side_len * side_len],
        }
    }

    /// Builds a board from raw cells.
    ///
    /// Returns `None` if the cell count is not `side_len * side_len`.
    pub fn from_cells(side_len: usize, cells: Vec<i32>) -> Option<Self> {
        (cells.len() == side_len * side_len).then_some(Self { side_len, cells })
    }

    /// Length of one side of the grid.
    pub fn side_len(&self) -> usize {
        self.side_len
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true for a zero-sized board.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Gets the value at the given position.
    pub fn get(&self, pos: usize) -> Option<i32> {
        self.cells.get(pos).copied()
    }

    /// Sets the value at the given position.
    pub fn set(&mut self, pos: usize, value: i32) -> Result<(), &'static str> {
        let cell = self.cells.get_mut(pos).ok_or("Position out of bounds")?;
        *cell = value;
        Ok(())
    }

    /// Checks if a cell is empty.
    pub fn is_open(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(0))
    }

    /// Positions of all empty cells, ascending.
    pub fn open_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of placed values.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|v| **v != 0).count()
    }

    /// Checks if every cell holds a value.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|v| *v != 0)
    }

    /// Checks whether a magnitude has been placed anywhere, with either sign.
    pub fn contains_magnitude(&self, magnitude: u32) -> bool {
        self.cells.iter().any(|v| v.unsigned_abs() == magnitude)
    }

    /// Number of negative cells.
    pub fn negative_count(&self) -> usize {
        self.cells.iter().filter(|v| **v < 0).count()
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }
}
