//! Tabulate options, sort order, and the command-line adapter.
//!
//! [`TabulateOptions`] is what the pipeline consumes. It can be built in
//! code, deserialized from configuration, or produced from parsed
//! [`TabulateArgs`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use clap::Args;
use serde::{de, Deserialize, Deserializer};
use tabprint_render::{ColorMode, TerminalInfo, DEFAULT_MAX_COL_WIDTH};

use crate::value::Value;

/// Marks a sort field as descending: `Name:reverse`.
pub const REVERSE_SUFFIX: &str = ":reverse";

/// Orders two raw rows. Cells are in column order.
pub type RowComparator = Arc<dyn Fn(&[Value], &[Value]) -> Ordering + Send + Sync>;

/// How table rows are ordered before display.
#[derive(Clone)]
pub enum SortBy {
    /// By one column's raw value, ascending unless `reverse`.
    Field { name: String, reverse: bool },
    /// By a caller-supplied comparator.
    Custom(RowComparator),
}

impl SortBy {
    pub fn field(name: impl Into<String>) -> Self {
        SortBy::Field {
            name: name.into(),
            reverse: false,
        }
    }

    pub fn reversed(name: impl Into<String>) -> Self {
        SortBy::Field {
            name: name.into(),
            reverse: true,
        }
    }

    pub fn custom<F>(compare: F) -> Self
    where
        F: Fn(&[Value], &[Value]) -> Ordering + Send + Sync + 'static,
    {
        SortBy::Custom(Arc::new(compare))
    }
}

impl fmt::Debug for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Field { name, reverse } => f
                .debug_struct("Field")
                .field("name", name)
                .field("reverse", reverse)
                .finish(),
            SortBy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, reverse) = match s.strip_suffix(REVERSE_SUFFIX) {
            Some(name) => (name, true),
            None => (s, false),
        };
        if name.is_empty() {
            return Err(format!("invalid sort field: '{}'", s));
        }
        Ok(SortBy::Field {
            name: name.to_string(),
            reverse,
        })
    }
}

impl<'de> Deserialize<'de> for SortBy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Options for [`tabulate`](crate::tabulate).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TabulateOptions {
    /// Dotted field paths, one per column.
    pub columns: Vec<String>,
    /// Emit a JSON array instead of a table.
    pub json: bool,
    pub sort_by: Option<SortBy>,
    /// Truncation width for cells. `0` shrinks the table to fit the terminal.
    pub max_col_width: usize,
    /// Prefixes removed from column names in the header.
    pub trim_col_names: Vec<String>,
    /// Header text used verbatim instead of the trimmed column names.
    pub display_column_names: Option<Vec<String>>,
    pub color: ColorMode,
    /// Output terminal. Probed from stdout when unset.
    #[serde(skip)]
    pub terminal: Option<TerminalInfo>,
}

impl Default for TabulateOptions {
    fn default() -> Self {
        TabulateOptions {
            columns: Vec::new(),
            json: false,
            sort_by: None,
            max_col_width: DEFAULT_MAX_COL_WIDTH,
            trim_col_names: Vec::new(),
            display_column_names: None,
            color: ColorMode::default(),
            terminal: None,
        }
    }
}

impl TabulateOptions {
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(columns: I) -> Self {
        TabulateOptions {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    pub fn max_col_width(mut self, width: usize) -> Self {
        self.max_col_width = width;
        self
    }

    pub fn trim_col_names<S: Into<String>, I: IntoIterator<Item = S>>(mut self, prefixes: I) -> Self {
        self.trim_col_names = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn display_column_names<S: Into<String>, I: IntoIterator<Item = S>>(
        mut self,
        names: I,
    ) -> Self {
        self.display_column_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    pub fn terminal(mut self, terminal: TerminalInfo) -> Self {
        self.terminal = Some(terminal);
        self
    }
}

/// Command-line flags for a listing command.
///
/// Flatten into a command's own arguments:
///
/// ```
/// use clap::Parser;
/// use tabprint::{TabulateArgs, TabulateOptions};
///
/// #[derive(Parser)]
/// struct Ls {
///     #[command(flatten)]
///     table: TabulateArgs,
/// }
///
/// let ls = Ls::parse_from(["ls", "--columns", "Name", "State.Name", "--sort-by", "Name:reverse"]);
/// let options = TabulateOptions::from(ls.table);
/// assert_eq!(options.columns, vec!["Name", "State.Name"]);
/// ```
#[derive(Args, Clone, Debug)]
pub struct TabulateArgs {
    /// Fields to show, as dotted paths
    #[arg(long, num_args = 1.., value_name = "FIELD")]
    pub columns: Vec<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Sort rows by this column; append ":reverse" for descending order
    #[arg(long, value_name = "FIELD")]
    pub sort_by: Option<SortBy>,

    /// Truncate cells to this width; 0 fits the table to the terminal
    #[arg(long, default_value_t = DEFAULT_MAX_COL_WIDTH)]
    pub max_col_width: usize,

    /// Prefixes to strip from column headers
    #[arg(long, num_args = 1.., value_name = "PREFIX")]
    pub trim_col_names: Vec<String>,

    /// When to use colors: always, never, or auto
    #[arg(long, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

impl From<TabulateArgs> for TabulateOptions {
    fn from(args: TabulateArgs) -> Self {
        TabulateOptions {
            columns: args.columns,
            json: args.json,
            sort_by: args.sort_by,
            max_col_width: args.max_col_width,
            trim_col_names: args.trim_col_names,
            display_column_names: None,
            color: args.color,
            terminal: None,
        }
    }
}
