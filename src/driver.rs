//! Line-oriented exchange between a peer and a [`GameSession`].

use crate::games::fifteen::{GameSession, Outcome, render_flat, render_grid};
use std::io::{BufRead, Write};
use tracing::{debug, error, info, instrument};

/// Reads one board per line and writes the engine's answer after each.
///
/// Stops when a turn ends the game or the input runs out. Rejected lines are
/// reported and the session keeps waiting for a corrected board.
#[instrument(skip_all)]
pub fn run_lines<R: BufRead, W: Write>(
    session: &mut GameSession,
    prompt: &str,
    mut input: R,
    mut output: W,
) -> std::io::Result<Option<Outcome>> {
    info!("Game has started.");

    loop {
        write!(output, "{} {}", "+".repeat(8), prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            info!("Input closed");
            return Ok(None);
        }
        debug!(input = %line.trim(), "Input received");

        match session.submit_line(&line) {
            Ok(report) => {
                writeln!(output)?;
                writeln!(output, "{}", render_grid(&report.board))?;
                writeln!(output, "{}", render_flat(&report.board))?;
                if let Some(outcome) = report.outcome {
                    if outcome.is_win() {
                        writeln!(output, "Game is over. {}", outcome)?;
                    } else {
                        writeln!(output, "Game is over without a winner. {}", outcome)?;
                    }
                    return Ok(Some(outcome));
                }
            }
            Err(e) => {
                error!(error = %e, "Turn aborted");
                writeln!(output)?;
                writeln!(output, "{}", e)?;
            }
        }
    }
}
