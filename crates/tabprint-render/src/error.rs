//! Error types for table rendering.
//!
//! This module provides [`RenderError`], the error type returned by
//! [`BoxTable::render`](crate::BoxTable::render).

use std::fmt;

/// Error type for table rendering operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Auto-fit was requested but the output is not an interactive terminal.
    ///
    /// This is a usage error: the caller asked for something that cannot be
    /// honored, rather than the data being malformed.
    NotATerminal,

    /// The header has a different number of cells than the table's columns.
    HeaderArity { expected: usize, found: usize },

    /// A data row has a different number of cells than the table's columns.
    RowArity {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl RenderError {
    /// Returns true for errors caused by how the renderer was invoked.
    pub fn is_usage(&self) -> bool {
        matches!(self, RenderError::NotATerminal)
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NotATerminal => {
                write!(f, "cannot auto-format table, output is not a terminal")
            }
            RenderError::HeaderArity { expected, found } => write!(
                f,
                "header has {} columns, table has {}",
                found, expected
            ),
            RenderError::RowArity {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {} has {} cells, table has {} columns",
                row, found, expected
            ),
        }
    }
}

impl std::error::Error for RenderError {}
