//! Box-drawn tables with ANSI-aware column sizing.
//!
//! [`BoxTable`] takes rows of already-formatted strings and lays them out in
//! light Unicode borders. Column widths are computed from visible characters,
//! so cells may carry color codes.
//!
//! ## Column limits
//!
//! Every cell is truncated to `max_col_width` visible characters (default
//! [`DEFAULT_MAX_COL_WIDTH`]), except:
//!
//! - column 0, treated as the row or id column
//! - any column whose header is `id` in any case
//!
//! ## Typed columns
//!
//! With [`BoxTable::column_specs`], a leading `Row` column is implied and each
//! header is colored by its [`ColumnType`].
//!
//! ## Auto-fit
//!
//! With [`BoxTable::auto_fit`], rendering is retried with a narrower
//! `max_col_width` until the table is no wider than the terminal (or 80
//! columns, whichever is larger). Auto-fit needs an interactive terminal.

mod decorator;
mod types;

pub use decorator::{
    render_table, BoxTable, DEFAULT_MAX_COL_WIDTH, MIN_COL_WIDTH, MIN_FIT_WIDTH, TOP_LEFT,
};
pub use types::{ColumnSpec, ColumnType, ROW_COLUMN};
