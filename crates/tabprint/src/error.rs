//! Error types for the tabulate pipeline.

use tabprint_render::RenderError;
use thiserror::Error;

use crate::resource::SourceError;

/// Errors that can occur while tabulating a collection.
#[derive(Debug, Error)]
pub enum TabulateError {
    /// A path segment named neither an attribute nor a key of its target.
    #[error("cannot resolve '{segment}' of field '{field}' on {item}")]
    FieldResolution {
        field: String,
        segment: String,
        item: String,
    },

    /// The data source failed while a field was read.
    #[error("data source error: {0}")]
    Source(#[from] SourceError),

    /// The table could not be laid out.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Sorting by a field the rows do not carry.
    #[error("cannot sort by '{0}': no such column")]
    UnknownSortField(String),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TabulateError {
    /// True for errors caused by the caller's arguments rather than the data
    /// or the environment.
    pub fn is_usage(&self) -> bool {
        match self {
            TabulateError::FieldResolution { .. } | TabulateError::UnknownSortField(_) => true,
            TabulateError::Render(e) => e.is_usage(),
            _ => false,
        }
    }
}

/// Result type for tabulate operations.
pub type Result<T> = std::result::Result<T, TabulateError>;
