//! Transcript session: the per-line processing loop.
//!
//! Reads the transcript line by line, feeds each line through the parser
//! and dispatcher, and renders the outcome: answers on the output stream,
//! per-line diagnostics on the error stream. One bad line never stops the
//! run; the session ends at end of input.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::dispatch::{Dispatcher, Outcome};
use crate::input::parse_line;

/// Counters describing a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    /// Input lines read.
    pub lines: u64,
    /// Lines rejected as malformed or duplicate.
    pub errors: u64,
    /// Queries answered (found, wait or not-found).
    pub queries: u64,
}

/// Process a whole transcript.
///
/// Outcomes are rendered one per input line, in input order:
///
/// - `Found` as `! name1; name2` on `out`
/// - `Wait` as `:-( stop` on `out`
/// - `NotFound` as `:-|` on `out`
/// - rejected lines as `Error in line N: <line>` on `err`, with `N`
///   counting from 1
/// - accepted facts and blank lines print nothing
///
/// # Errors
///
/// Only I/O errors from the streams propagate; they are the one failure
/// that ends a session early.
pub fn run(
    input: impl BufRead,
    mut out: impl Write,
    mut err: impl Write,
) -> io::Result<SessionSummary> {
    let mut dispatcher = Dispatcher::new();
    let mut summary = SessionSummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let number = index as u64 + 1;
        summary.lines = number;

        match dispatcher.handle(parse_line(&line)) {
            Outcome::NoResponse => {}
            Outcome::ParseError | Outcome::DuplicateError => {
                summary.errors += 1;
                writeln!(err, "Error in line {number}: {line}")?;
            }
            Outcome::Found(names) => {
                summary.queries += 1;
                writeln!(out, "! {}", names.join("; "))?;
            }
            Outcome::Wait(stop) => {
                summary.queries += 1;
                writeln!(out, ":-( {stop}")?;
            }
            Outcome::NotFound => {
                summary.queries += 1;
                writeln!(out, ":-|")?;
            }
        }
    }

    debug!(
        lines = summary.lines,
        errors = summary.errors,
        queries = summary.queries,
        "transcript finished"
    );
    Ok(summary)
}
