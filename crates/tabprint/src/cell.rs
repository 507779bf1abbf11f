//! Cell extraction and display formatting.
//!
//! [`get_cell`] turns one field of one resource into a [`Value`]: it resolves
//! the dotted path, runs the field's transform, and flattens child
//! collections to their names. [`format_cell`] then turns that value into the
//! text shown in a table cell.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use crate::error::TabulateError;
use crate::resource::{resolve_field, Resource, SourceError};
use crate::value::Value;

/// Cell text substituted when the data source refuses access.
pub const ACCESS_DENIED: &str = "[Access denied]";

/// Per-field conversion, called with the resolved value and the row's resource.
pub type CellTransform = Arc<dyn Fn(Value, &dyn Resource) -> Value + Send + Sync>;

/// Magnitude a unit must reach before it is used for a relative time.
const UNIT_THRESHOLD: f64 = 0.85;

const TIME_UNITS: [(&str, f64); 7] = [
    ("year", 365.0 * 86_400.0),
    ("month", 30.0 * 86_400.0),
    ("week", 7.0 * 86_400.0),
    ("day", 86_400.0),
    ("hour", 3_600.0),
    ("minute", 60.0),
    ("second", 1.0),
];

/// Extract `field` from `resource` as a cell value.
///
/// An access-denied error from the data source, whether raised while the
/// path is resolved or while child names are listed, becomes the
/// [`ACCESS_DENIED`] marker. Every other error is returned.
pub fn get_cell(
    resource: &dyn Resource,
    field: &str,
    transform: Option<&CellTransform>,
) -> Result<Value, TabulateError> {
    let value = match resolve_field(resource, field) {
        Ok(value) => value,
        Err(TabulateError::Source(e)) => return denied_or(field, e),
        Err(e) => return Err(e),
    };

    let value = match transform {
        Some(transform) => transform(value, resource),
        None => value,
    };

    match value {
        Value::Children(children) => match children.child_names() {
            Ok(names) => Ok(Value::Str(names.join(", "))),
            Err(e) => denied_or(field, e),
        },
        other => Ok(other),
    }
}

fn denied_or(field: &str, error: SourceError) -> Result<Value, TabulateError> {
    if error.is_access_denied() {
        debug!(field, error = %error, "access denied, substituting marker");
        Ok(Value::from(ACCESS_DENIED))
    } else {
        Err(TabulateError::Source(error))
    }
}

/// Display text for a cell, with relative times measured from the current time.
pub fn format_cell(cell: &Value) -> String {
    format_cell_at(cell, Utc::now())
}

/// Display text for a cell, with relative times measured from `now`.
///
/// Timestamps become "3 hours ago" or "in 2 days". A duration is shown as
/// the time that far in the past, so a positive duration reads "… ago".
/// Lists and maps are shown as JSON. Everything else uses its display form:
/// `Null` is empty text and floats use their shortest form, so `1.0` is "1".
pub fn format_cell_at(cell: &Value, now: DateTime<Utc>) -> String {
    match cell {
        Value::Timestamp(ts) => relative_time(whole_seconds(*ts) - now),
        Value::Duration(d) => relative_time(-*d),
        other => other.to_string(),
    }
}

fn whole_seconds(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(ts.timestamp(), 0).unwrap_or(ts)
}

/// Human phrase for an offset from now: positive is the future.
///
/// The largest unit reaching 0.85 of itself is used, rounded half to even
/// with a floor of one. A fraction of a second ahead reads "in 0 seconds".
pub fn relative_time(delta: TimeDelta) -> String {
    let seconds = delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9;
    if seconds == 0.0 {
        return "now".to_string();
    }

    let magnitude = seconds.abs();
    let (unit, count) = TIME_UNITS
        .iter()
        .find(|(_, size)| magnitude / size >= UNIT_THRESHOLD)
        .map(|(unit, size)| (*unit, (magnitude / size).round_ties_even().max(1.0)))
        // Under a second: floored to whole seconds, so ahead is 0 and behind is 1.
        .unwrap_or(("second", if seconds > 0.0 { 0.0 } else { 1.0 }));

    let count = count as u64;
    let phrase = if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    };

    if seconds > 0.0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}
