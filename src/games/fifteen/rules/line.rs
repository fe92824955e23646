//! Winning lines and the ordered rule set that holds them.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three cell indices whose values are checked together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRule {
    /// First cell.
    pub a: usize,
    /// Second cell.
    pub b: usize,
    /// Third cell.
    pub c: usize,
}

impl LineRule {
    /// Creates a new line.
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    /// Returns the three cell indices in order.
    pub fn cells(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

impl From<[usize; 3]> for LineRule {
    fn from([a, b, c]: [usize; 3]) -> Self {
        Self::new(a, b, c)
    }
}

impl std::fmt::Display for LineRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.a, self.b, self.c)
    }
}

/// Standard lines for a 3x3 grid: columns, rows, then diagonals.
pub const STANDARD_LINES: [LineRule; 8] = [
    // Vertical
    LineRule::new(0, 3, 6),
    LineRule::new(1, 4, 7),
    LineRule::new(2, 5, 8),
    // Horizontal
    LineRule::new(0, 1, 2),
    LineRule::new(3, 4, 5),
    LineRule::new(6, 7, 8),
    // Diagonal
    LineRule::new(0, 4, 8),
    LineRule::new(2, 4, 6),
];

/// Why a rule set could not be built.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RuleSetError {
    /// A rule points outside the board.
    #[display("Rule {} references cell {} on a board of {} cells", rule, index, cells)]
    IndexOutOfBounds {
        /// The offending rule.
        rule: LineRule,
        /// The out-of-range index.
        index: usize,
        /// Cells on the board.
        cells: usize,
    },
    /// A rule names the same cell twice.
    #[display("Rule {} repeats a cell", _0)]
    RepeatedIndex(#[error(not(source))] LineRule),
    /// No rules were supplied.
    #[display("Rule set is empty")]
    Empty,
}

/// Ordered, immutable list of winning lines for one grid size.
///
/// Order matters: the move selector acts on the first line that forces a
/// decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    side_len: usize,
    rules: Vec<LineRule>,
}

impl RuleSet {
    /// Builds a rule set, checking every index fits the grid.
    #[instrument(skip(rules), fields(count = rules.len()))]
    pub fn new(side_len: usize, rules: Vec<LineRule>) -> Result<Self, RuleSetError> {
        if rules.is_empty() {
            return Err(RuleSetError::Empty);
        }
        let cells = side_len * side_len;
        for rule in &rules {
            if let Some(&index) = rule.cells().iter().find(|&&i| i >= cells) {
                return Err(RuleSetError::IndexOutOfBounds {
                    rule: *rule,
                    index,
                    cells,
                });
            }
            if rule.a == rule.b || rule.b == rule.c || rule.a == rule.c {
                return Err(RuleSetError::RepeatedIndex(*rule));
            }
        }
        Ok(Self { side_len, rules })
    }

    /// The eight lines of a 3x3 grid.
    pub fn standard() -> Self {
        Self {
            side_len: 3,
            rules: STANDARD_LINES.to_vec(),
        }
    }

    /// Grid side length the rules were built for.
    pub fn side_len(&self) -> usize {
        self.side_len
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[LineRule] {
        &self.rules
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
