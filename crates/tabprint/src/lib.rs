//! # Tabprint - Tabulate Heterogeneous Collections for the Terminal
//!
//! Tabprint turns a collection of objects into a Unicode box table or a JSON
//! document. It is meant for listing commands: each row is one resource
//! (an API response, a JSON object, any type implementing [`Resource`]) and
//! each column is a dotted field path into it.
//!
//! - Field extraction across objects and mappings ([`resolve_field`])
//! - Per-field transforms and child-collection flattening ([`get_cell`])
//! - Relative times, tag lists, and byte counts formatted for humans
//! - Sorting by any column, with `Name:reverse` for descending order
//! - Column truncation and shrink-to-fit rendering via [`tabprint_render`]
//! - Paging of tall tables via [`tabprint_pager`]
//!
//! Argument parsing is up to the caller. [`TabulateArgs`] is a ready-made
//! set of clap flags that converts into [`TabulateOptions`].
//!
//! ## Core Concepts
//!
//! - [`Value`]: a resolved cell, before formatting
//! - [`Resource`] and [`NamedChildren`]: what fields are read from
//! - [`TabulateOptions`]: columns, sort order, output mode, widths
//! - [`CellTransforms`]: per-field conversion functions
//! - [`TabulateError`]: everything that can go wrong, with
//!   [`is_usage`](TabulateError::is_usage) separating caller mistakes
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use tabprint::{tabulate, CellTransforms, ColorMode, TabulateOptions, TerminalInfo};
//!
//! let buckets = vec![
//!     json!({"Name": "logs", "Tags": [{"Key": "env", "Value": "prod"}]}),
//!     json!({"Name": "assets", "Tags": []}),
//! ];
//!
//! let options = TabulateOptions::new(["Name", "Tags"])
//!     .color(ColorMode::Never)
//!     .terminal(TerminalInfo::piped());
//!
//! let table = tabulate(&buckets, &options, &CellTransforms::new()).unwrap();
//! assert!(table.contains("│logs  │env=prod│"));
//!
//! let json = tabulate(&buckets, &options.clone().json(true), &CellTransforms::new()).unwrap();
//! assert!(json.contains(r#""Tags": "env=prod""#));
//! ```
//!
//! To write to stdout with paging, use [`print_tabulated`] instead.

pub mod cell;
mod error;
pub mod format;
pub mod options;
pub mod resource;
pub mod tabulate;
pub mod value;

pub use cell::{format_cell, format_cell_at, get_cell, relative_time, CellTransform, ACCESS_DENIED};
pub use error::{Result, TabulateError};
pub use format::{format_number, format_number_with, format_tags, trim_names};
pub use options::{RowComparator, SortBy, TabulateArgs, TabulateOptions, REVERSE_SUFFIX};
pub use resource::{resolve_field, NamedChildren, Resource, SourceError, ACCESS_DENIED_CODE};
pub use tabulate::{print_tabulated, tabulate, tabulate_at, CellTransforms};
pub use value::Value;

// Rendering and paging, re-exported for single-crate use
pub use tabprint_render::{
    render_table, strip_ansi, visible_truncate, visible_width, BoxTable, ColorMode, ColumnSpec,
    ColumnType, Palette, RenderError, TerminalInfo, Tint,
};
pub use tabprint_pager::{Pager, PagerError};

pub use tabprint_pager;
pub use tabprint_render;
