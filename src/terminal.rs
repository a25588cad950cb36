//! Output stream helpers: terminal detection and buffered stdout.

use crossterm::tty::IsTty;
use std::io::{self, Stdout};

/// Whether stdout is an interactive terminal (not a pipe or a redirected file).
pub fn stdout_is_terminal() -> bool {
    io::stdout().is_tty()
}

/// Create a BufWriter wrapping stdout with a generous buffer.
pub fn buffered_stdout() -> io::BufWriter<Stdout> {
    io::BufWriter::with_capacity(64 * 1024, io::stdout())
}
