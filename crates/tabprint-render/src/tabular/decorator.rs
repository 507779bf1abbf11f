//! Box-drawn table rendering.
//!
//! [`BoxTable`] lays out rows of pre-rendered strings inside light Unicode
//! box-drawing borders:
//!
//! ```text
//! ┌──┬───┐
//! │A │B  │
//! ├──┼───┤
//! │1 │abc│
//! │22│d  │
//! └──┴───┘
//! ```
//!
//! Each column is as wide as its widest (truncated) cell, measured in visible
//! characters, so embedded color codes never skew the alignment.
//!
//! # Example
//!
//! ```rust
//! use tabprint_render::{BoxTable, ColorMode};
//!
//! let rows = vec![vec!["1", "abc"], vec!["22", "d"]];
//! let out = BoxTable::new()
//!     .header(["A", "B"])
//!     .color(ColorMode::Never)
//!     .render(&rows)
//!     .unwrap();
//!
//! assert_eq!(out.lines().nth(3), Some("│1 │abc│"));
//! ```

use tracing::debug;

use super::types::ColumnSpec;
use crate::error::RenderError;
use crate::measure::{pad_visible, truncate_cell, visible_width};
use crate::style::{ColorMode, Palette, Tint};
use crate::terminal::TerminalInfo;

/// Default truncation width for non-exempt columns.
pub const DEFAULT_MAX_COL_WIDTH: usize = 32;

/// Auto-fit never shrinks columns below this width.
pub const MIN_COL_WIDTH: usize = 1;

/// Auto-fit always allows at least this many columns.
pub const MIN_FIT_WIDTH: usize = 80;

/// Box-drawing characters.
#[derive(Clone, Copy, Debug)]
struct BorderChars {
    horizontal: char,
    vertical: char,
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    left_t: char,
    cross: char,
    right_t: char,
    top_t: char,
    bottom_t: char,
}

const LIGHT: BorderChars = BorderChars {
    horizontal: '─',
    vertical: '│',
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    left_t: '├',
    cross: '┼',
    right_t: '┤',
    top_t: '┬',
    bottom_t: '┴',
};

/// First character of every rendered table.
pub const TOP_LEFT: char = LIGHT.top_left;

/// Type of horizontal line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineType {
    Top,
    Middle,
    Bottom,
}

/// A box-drawn table renderer.
#[derive(Clone, Debug)]
pub struct BoxTable {
    headers: Option<Vec<String>>,
    specs: Option<Vec<ColumnSpec>>,
    max_col_width: usize,
    auto_fit: bool,
    color: ColorMode,
    terminal: Option<TerminalInfo>,
}

impl Default for BoxTable {
    fn default() -> Self {
        BoxTable::new()
    }
}

impl BoxTable {
    pub fn new() -> Self {
        BoxTable {
            headers: None,
            specs: None,
            max_col_width: DEFAULT_MAX_COL_WIDTH,
            auto_fit: false,
            color: ColorMode::Auto,
            terminal: None,
        }
    }

    /// Set the column headers.
    pub fn header<S: Into<String>, I: IntoIterator<Item = S>>(mut self, headers: I) -> Self {
        self.headers = Some(headers.into_iter().map(|s| s.into()).collect());
        self
    }

    /// Set typed column metadata.
    ///
    /// Headers become `Row` followed by the `ColumnSpec` names, replacing any set
    /// with [`header`](Self::header), and every data row is expected to
    /// start with a row-index cell.
    pub fn column_specs<I: IntoIterator<Item = ColumnSpec>>(mut self, specs: I) -> Self {
        self.specs = Some(specs.into_iter().collect());
        self
    }

    pub fn max_col_width(mut self, width: usize) -> Self {
        self.max_col_width = width;
        self
    }

    /// Shrink `max_col_width` until the table fits the terminal.
    pub fn auto_fit(mut self, enable: bool) -> Self {
        self.auto_fit = enable;
        self
    }

    pub fn color(mut self, mode: ColorMode) -> Self {
        self.color = mode;
        self
    }

    /// Use this terminal instead of probing stdout.
    pub fn terminal(mut self, terminal: TerminalInfo) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// Render the complete table.
    ///
    /// Fails with [`RenderError::NotATerminal`] when auto-fit is requested
    /// for non-interactive output, and with an arity error when a row or the
    /// header disagrees with the column count.
    pub fn render<S: AsRef<str>>(&self, rows: &[Vec<S>]) -> Result<String, RenderError> {
        let terminal = self.terminal.unwrap_or_else(TerminalInfo::stdout);
        let palette = Palette::for_terminal(self.color, &terminal);
        let layout = Layout::new(self.headers.as_deref(), self.specs.as_deref(), rows)?;

        if !self.auto_fit {
            return Ok(layout.draw(rows, self.max_col_width, palette));
        }

        if !terminal.interactive {
            return Err(RenderError::NotATerminal);
        }

        let fit = terminal.columns().max(MIN_FIT_WIDTH);
        let mut max_col_width = self.max_col_width;
        loop {
            let rendered = layout.draw(rows, max_col_width, palette);
            let table_width = rendered.lines().next().map(visible_width).unwrap_or(0);
            if table_width <= fit || max_col_width <= MIN_COL_WIDTH {
                return Ok(rendered);
            }
            debug!(table_width, fit, max_col_width, "table too wide, shrinking columns");
            max_col_width -= 1;
        }
    }
}

/// Render `rows` under `column_names` without color or auto-fit.
pub fn render_table<S: AsRef<str>>(
    rows: &[Vec<S>],
    column_names: &[&str],
    max_col_width: usize,
) -> Result<String, RenderError> {
    BoxTable::new()
        .header(column_names.iter().copied())
        .max_col_width(max_col_width)
        .color(ColorMode::Never)
        .terminal(TerminalInfo::piped())
        .render(rows)
}

/// Resolved headers and column count for one render call.
struct Layout {
    names: Option<Vec<String>>,
    specs: Option<Vec<ColumnSpec>>,
    num_columns: usize,
}

impl Layout {
    fn new<S: AsRef<str>>(
        names: Option<&[String]>,
        specs: Option<&[ColumnSpec]>,
        rows: &[Vec<S>],
    ) -> Result<Self, RenderError> {
        let num_columns = rows
            .first()
            .map(|row| row.len())
            .or_else(|| specs.map(|s| s.len() + 1))
            .or_else(|| names.map(|n| n.len()))
            .unwrap_or(0);

        let (names, specs) = match specs {
            Some(specs) => {
                let mut all = Vec::with_capacity(specs.len() + 1);
                all.push(ColumnSpec::row_index());
                all.extend_from_slice(specs);
                let names = all.iter().map(|s| s.name.clone()).collect();
                (Some(names), Some(all))
            }
            None => (names.map(<[String]>::to_vec), None),
        };

        if let Some(names) = &names {
            if names.len() != num_columns {
                return Err(RenderError::HeaderArity {
                    expected: num_columns,
                    found: names.len(),
                });
            }
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != num_columns {
                return Err(RenderError::RowArity {
                    row,
                    expected: num_columns,
                    found: cells.len(),
                });
            }
        }

        Ok(Layout {
            names,
            specs,
            num_columns,
        })
    }

    /// Column 0 and any column headed `id` are never truncated.
    fn limits(&self, max_col_width: usize) -> Vec<Option<usize>> {
        (0..self.num_columns)
            .map(|i| {
                let is_id = self
                    .names
                    .as_ref()
                    .is_some_and(|names| names[i].eq_ignore_ascii_case("id"));
                if i == 0 || is_id {
                    None
                } else {
                    Some(max_col_width)
                }
            })
            .collect()
    }

    fn header_tint(&self, i: usize) -> Tint {
        match &self.specs {
            Some(specs) => specs[i].kind.tint(),
            None => Tint::White,
        }
    }

    fn draw<S: AsRef<str>>(&self, rows: &[Vec<S>], max_col_width: usize, palette: Palette) -> String {
        let limits = self.limits(max_col_width);
        let mut widths = vec![0usize; self.num_columns];

        let headers: Vec<String> = match &self.names {
            Some(names) => names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let cell = truncate_cell(name, limits[i]).into_owned();
                    widths[i] = widths[i].max(visible_width(&cell));
                    cell
                })
                .collect(),
            None => Vec::new(),
        };

        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(i, value)| {
                        let cell = truncate_cell(value.as_ref(), limits[i]).into_owned();
                        widths[i] = widths[i].max(visible_width(&cell));
                        cell
                    })
                    .collect()
            })
            .collect();

        let mut output = Vec::with_capacity(cells.len() + 4);
        output.push(horizontal_line(&widths, LineType::Top, palette));

        if !headers.is_empty() {
            let styled: Vec<String> = headers
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    let pad = widths[i].saturating_sub(visible_width(name));
                    format!("{}{}", palette.header(self.header_tint(i), name), " ".repeat(pad))
                })
                .collect();
            output.push(wrap_row(&styled, palette));
            output.push(horizontal_line(&widths, LineType::Middle, palette));
        }

        for row in &cells {
            let padded: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| pad_visible(cell, widths[i]))
                .collect();
            output.push(wrap_row(&padded, palette));
        }

        output.push(horizontal_line(&widths, LineType::Bottom, palette));
        output.join("\n")
    }
}

/// Join cells with vertical borders.
fn wrap_row(cells: &[String], palette: Palette) -> String {
    let bar = palette.border(LIGHT.vertical);
    format!("{}{}{}", bar, cells.join(&bar), bar)
}

/// Generate a horizontal line (top, middle, or bottom).
fn horizontal_line(widths: &[usize], line_type: LineType, palette: Palette) -> String {
    let (left, joint, right) = match line_type {
        LineType::Top => (LIGHT.top_left, LIGHT.top_t, LIGHT.top_right),
        LineType::Middle => (LIGHT.left_t, LIGHT.cross, LIGHT.right_t),
        LineType::Bottom => (LIGHT.bottom_left, LIGHT.bottom_t, LIGHT.bottom_right),
    };

    let mut line = String::new();
    line.push(left);
    for (i, &width) in widths.iter().enumerate() {
        if i > 0 {
            line.push(joint);
        }
        line.extend(std::iter::repeat_n(LIGHT.horizontal, width));
    }
    line.push(right);

    palette.border(line)
}
