//! Terminal capability probe.
//!
//! Rendering decisions that depend on the controlling terminal (color, auto-fit,
//! paging) read a [`TerminalInfo`] instead of querying process streams from
//! leaf functions. [`TerminalInfo::stdout`] detects the real terminal; tests and
//! non-stdout sinks construct one directly.

use terminal_size::{terminal_size, Height, Width};

/// Fallback size used when the terminal does not report one.
pub const DEFAULT_SIZE: (usize, usize) = (80, 24);

/// Snapshot of what the output terminal can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalInfo {
    /// Whether output goes to an interactive terminal.
    pub interactive: bool,
    /// `(columns, rows)` if the terminal reported its size.
    pub size: Option<(usize, usize)>,
}

impl TerminalInfo {
    /// Probes standard output.
    pub fn stdout() -> Self {
        let interactive = console::Term::stdout().is_term();
        let size = terminal_size().map(|(Width(w), Height(h))| (w as usize, h as usize));
        TerminalInfo { interactive, size }
    }

    /// An interactive terminal of the given size.
    pub fn interactive(columns: usize, rows: usize) -> Self {
        TerminalInfo {
            interactive: true,
            size: Some((columns, rows)),
        }
    }

    /// A pipe or file: not interactive, no size.
    pub fn piped() -> Self {
        TerminalInfo {
            interactive: false,
            size: None,
        }
    }

    /// Reported size, or [`DEFAULT_SIZE`].
    pub fn size_or_default(&self) -> (usize, usize) {
        self.size.unwrap_or(DEFAULT_SIZE)
    }

    pub fn columns(&self) -> usize {
        self.size_or_default().0
    }

    pub fn rows(&self) -> usize {
        self.size_or_default().1
    }
}
