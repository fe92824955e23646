//! Text exchange format for boards.
//!
//! A board travels as one line of comma-separated signed integers in
//! row-major order, for example `0,0,5,0,-1,0,0,0,0`.

use super::Board;
use tracing::instrument;

/// Malformed board line.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InputError {
    /// The line does not hold one token per cell.
    #[display("Board state size is wrong: expected={}, got={}", expected, got)]
    WrongTokenCount {
        /// Cells on the board.
        expected: usize,
        /// Tokens found on the line.
        got: usize,
    },
    /// A token is not a signed integer.
    #[display("Not an integer: {:?}", token)]
    NotAnInteger {
        /// The offending token, trimmed.
        token: String,
    },
}

/// Parses a comma-separated line into a `side_len` x `side_len` board.
///
/// Whitespace around tokens is ignored.
#[instrument]
pub fn parse_board(line: &str, side_len: usize) -> Result<Board, InputError> {
    let expected = side_len * side_len;
    let tokens: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if tokens.len() != expected {
        return Err(InputError::WrongTokenCount {
            expected,
            got: tokens.len(),
        });
    }

    let cells = tokens
        .into_iter()
        .map(|token| {
            token.parse::<i32>().map_err(|_| InputError::NotAnInteger {
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Board::from_cells(side_len, cells).ok_or(InputError::WrongTokenCount {
        expected,
        got: expected,
    })
}

/// Renders the board in the same format [`parse_board`] reads.
pub fn render_flat(board: &Board) -> String {
    board
        .cells()
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders the board as a framed grid, one row per line.
pub fn render_grid(board: &Board) -> String {
    let rule = "-".repeat(board.side_len() * 4 + 2);
    let mut lines = vec![rule.clone()];
    for row in board.cells().chunks(board.side_len().max(1)) {
        let cells: Vec<String> = row.iter().map(|v| format!("{:>3}", v)).collect();
        lines.push(cells.join(" "));
    }
    lines.push(rule);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let board = parse_board("0, 0,5,0,-1,0,0,0,0\n", 3).unwrap();
        assert_eq!(board.cells(), &[0, 0, 5, 0, -1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_parse_wrong_count() {
        assert_eq!(
            parse_board("1,2,3", 3),
            Err(InputError::WrongTokenCount {
                expected: 9,
                got: 3
            })
        );
    }

    #[test]
    fn test_parse_empty_line() {
        assert!(matches!(
            parse_board("", 3),
            Err(InputError::WrongTokenCount { got: 1, .. })
        ));
    }

    #[test]
    fn test_parse_non_integer() {
        assert_eq!(
            parse_board("0,0,x,0,0,0,0,0,0", 3),
            Err(InputError::NotAnInteger {
                token: "x".to_string()
            })
        );
    }

    #[test]
    fn test_flat_round_trips() {
        let line = "9,0,0,0,7,0,0,0,-1";
        assert_eq!(render_flat(&parse_board(line, 3).unwrap()), line);
    }

    #[test]
    fn test_grid_layout() {
        let board = parse_board("9,0,0,0,7,0,0,0,-1", 3).unwrap();
        let expected = [
            "--------------",
            "  9   0   0",
            "  0   7   0",
            "  0   0  -1",
            "--------------",
        ]
        .join("\n");
        assert_eq!(render_grid(&board), expected);
    }
}
