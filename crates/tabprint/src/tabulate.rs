//! The tabulate pipeline: resources in, table or JSON text out.
//!
//! For every resource and column, the field is resolved and transformed
//! into a raw [`Value`]. JSON mode serializes those raw values directly.
//! Table mode sorts rows by raw value, formats each cell for display, and
//! hands the strings to [`BoxTable`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tabprint_pager::Pager;
use tabprint_render::{BoxTable, TerminalInfo, DEFAULT_MAX_COL_WIDTH};
use tracing::debug;

use crate::cell::{format_cell_at, get_cell, CellTransform};
use crate::error::{Result, TabulateError};
use crate::format::{format_tags, trim_names};
use crate::options::{SortBy, TabulateOptions};
use crate::resource::Resource;
use crate::value::Value;

/// Column names that receive [`format_tags`] unless overridden.
const TAG_COLUMNS: [&str; 2] = ["Tags", "tags"];

/// Transforms keyed by field path.
#[derive(Clone, Default)]
pub struct CellTransforms {
    transforms: HashMap<String, CellTransform>,
}

impl CellTransforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `transform` for `field`, replacing any previous one.
    pub fn with<F>(mut self, field: impl Into<String>, transform: F) -> Self
    where
        F: Fn(Value, &dyn Resource) -> Value + Send + Sync + 'static,
    {
        self.insert(field, transform);
        self
    }

    pub fn insert<F>(&mut self, field: impl Into<String>, transform: F)
    where
        F: Fn(Value, &dyn Resource) -> Value + Send + Sync + 'static,
    {
        self.transforms.insert(field.into(), Arc::new(transform));
    }

    pub fn get(&self, field: &str) -> Option<&CellTransform> {
        self.transforms.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.transforms.contains_key(field)
    }

    /// Adds [`format_tags`] for the tag column unless one is registered.
    ///
    /// The tag column is `Tags` when that is one of `columns`, else `tags`.
    fn with_tag_default(&self, columns: &[String]) -> CellTransforms {
        let tag_column = if columns.iter().any(|c| c == TAG_COLUMNS[0]) {
            TAG_COLUMNS[0]
        } else {
            TAG_COLUMNS[1]
        };
        let mut transforms = self.clone();
        if !transforms.contains(tag_column) {
            transforms.insert(tag_column, format_tags);
        }
        transforms
    }
}

impl fmt::Debug for CellTransforms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&String> = self.transforms.keys().collect();
        fields.sort();
        f.debug_struct("CellTransforms")
            .field("fields", &fields)
            .finish()
    }
}

/// Tabulate `collection` with relative times measured from the current time.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tabprint::{tabulate, CellTransforms, ColorMode, TabulateOptions, TerminalInfo};
///
/// let instances = vec![
///     json!({"InstanceId": "i-2", "State": {"Name": "stopped"}}),
///     json!({"InstanceId": "i-1", "State": {"Name": "running"}}),
/// ];
/// let options = TabulateOptions::new(["InstanceId", "State.Name"])
///     .sort_by("InstanceId".parse().unwrap())
///     .trim_col_names(["State."])
///     .color(ColorMode::Never)
///     .terminal(TerminalInfo::piped());
///
/// let table = tabulate(&instances, &options, &CellTransforms::new()).unwrap();
/// assert_eq!(
///     table,
///     "┌──────────┬───────┐\n\
///      │InstanceId│Name   │\n\
///      ├──────────┼───────┤\n\
///      │i-1       │running│\n\
///      │i-2       │stopped│\n\
///      └──────────┴───────┘"
/// );
/// ```
pub fn tabulate<R: Resource>(
    collection: &[R],
    options: &TabulateOptions,
    transforms: &CellTransforms,
) -> Result<String> {
    tabulate_at(collection, options, transforms, Utc::now())
}

/// Tabulate `collection`, measuring relative times from `now`.
pub fn tabulate_at<R: Resource>(
    collection: &[R],
    options: &TabulateOptions,
    transforms: &CellTransforms,
    now: DateTime<Utc>,
) -> Result<String> {
    let transforms = transforms.with_tag_default(&options.columns);
    debug!(
        items = collection.len(),
        columns = options.columns.len(),
        json = options.json,
        "tabulating"
    );

    if options.json {
        return to_json(collection, &options.columns, &transforms);
    }

    let mut rows = raw_rows(collection, &options.columns, &transforms)?;
    if let Some(sort_by) = &options.sort_by {
        sort_rows(&mut rows, sort_by, &options.columns)?;
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| format_cell_at(cell, now)).collect())
        .collect();

    let header = match &options.display_column_names {
        Some(names) => names.clone(),
        None => trim_names(&options.columns, &options.trim_col_names),
    };

    let auto_fit = options.max_col_width == 0;
    let max_col_width = if auto_fit {
        DEFAULT_MAX_COL_WIDTH
    } else {
        options.max_col_width
    };

    let table = BoxTable::new()
        .header(header)
        .max_col_width(max_col_width)
        .auto_fit(auto_fit)
        .color(options.color)
        .terminal(options.terminal.unwrap_or_else(TerminalInfo::stdout))
        .render(&cells)?;
    Ok(table)
}

/// Tabulate `collection` and write it to stdout, paging tall or wide tables.
pub fn print_tabulated<R: Resource>(
    collection: &[R],
    options: &TabulateOptions,
    transforms: &CellTransforms,
) -> Result<()> {
    let terminal = options.terminal.unwrap_or_else(TerminalInfo::stdout);
    let mut options = options.clone();
    options.terminal = Some(terminal);

    let output = tabulate(collection, &options, transforms)?;
    Pager::new().terminal(terminal).page(&output)?;
    Ok(())
}

fn raw_rows<R: Resource>(
    collection: &[R],
    columns: &[String],
    transforms: &CellTransforms,
) -> Result<Vec<Vec<Value>>> {
    collection
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|field| get_cell(item, field, transforms.get(field)))
                .collect::<Result<Vec<Value>>>()
        })
        .collect()
}

fn to_json<R: Resource>(
    collection: &[R],
    columns: &[String],
    transforms: &CellTransforms,
) -> Result<String> {
    let mut objects = Vec::with_capacity(collection.len());
    for item in collection {
        let mut object = serde_json::Map::new();
        for field in columns {
            let cell = get_cell(item, field, transforms.get(field))?;
            object.insert(field.clone(), cell.to_json());
        }
        objects.push(serde_json::Value::Object(object));
    }
    Ok(serde_json::to_string_pretty(&objects)?)
}

/// Stable sort, so rows with equal keys keep their collection order.
fn sort_rows(rows: &mut [Vec<Value>], sort_by: &SortBy, columns: &[String]) -> Result<()> {
    match sort_by {
        SortBy::Field { name, reverse } => {
            let index = columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| TabulateError::UnknownSortField(name.clone()))?;
            rows.sort_by(|a, b| {
                let order = a[index].sort_cmp(&b[index]);
                if *reverse {
                    order.reverse()
                } else {
                    order
                }
            });
        }
        SortBy::Custom(compare) => rows.sort_by(|a, b| compare(a, b)),
    }
    Ok(())
}
