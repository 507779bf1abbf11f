//! # Tabprint Render - Box Tables for Terminal Output
//!
//! `tabprint-render` draws fixed-width Unicode box tables and provides the
//! ANSI helpers they are built from. It is the rendering foundation for the
//! `tabprint` crate, but can be used on its own for any pre-formatted rows.
//!
//! ## Core Concepts
//!
//! - [`BoxTable`]: box-drawn table with per-column truncation and auto-fit
//! - [`Palette`]: conditional escape codes, driven by a [`ColorMode`]
//! - [`TerminalInfo`]: interactivity and size of the output terminal
//! - [`strip_ansi`], [`visible_width`], [`visible_truncate`]: measurement
//!   that ignores escape sequences
//!
//! ## Quick Start
//!
//! ```rust
//! use tabprint_render::{BoxTable, ColorMode, TerminalInfo};
//!
//! let rows = vec![
//!     vec!["web-1", "running"],
//!     vec!["db-1", "stopped"],
//! ];
//!
//! let table = BoxTable::new()
//!     .header(["Name", "State"])
//!     .color(ColorMode::Never)
//!     .terminal(TerminalInfo::piped())
//!     .render(&rows)
//!     .unwrap();
//!
//! assert!(table.starts_with('┌'));
//! assert!(table.contains("│web-1│running│"));
//! ```

mod error;
pub mod measure;
pub mod style;
pub mod tabular;
pub mod terminal;

pub use error::RenderError;

pub use measure::{
    pad_visible, strip_ansi, truncate_cell, visible_truncate, visible_width, ANSI_PATTERN,
    ELLIPSIS,
};
pub use style::{ColorMode, Palette, Tint};
pub use tabular::{
    render_table, BoxTable, ColumnSpec, ColumnType, DEFAULT_MAX_COL_WIDTH, MIN_COL_WIDTH,
    MIN_FIT_WIDTH, ROW_COLUMN, TOP_LEFT,
};
pub use terminal::{TerminalInfo, DEFAULT_SIZE};
