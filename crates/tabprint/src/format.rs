//! Small display helpers used by the tabulate pipeline.

use crate::resource::{resolve_field, Resource};
use crate::value::Value;

/// Suffixes for [`format_number`], each 1024 times the previous.
const SIZE_SUFFIXES: [&str; 4] = ["K", "M", "G", "T"];

/// Render a tag collection as `"k1=v1, k2=v2"`.
///
/// Each item is a mapping or resource carrying `Key` and `Value`. A key seen
/// twice keeps its first position and its last value. Items without a `Key`
/// are skipped. `Null` and empty lists become an empty string, and anything
/// that is not a list is returned unchanged.
pub fn format_tags(cell: Value, _row: &dyn Resource) -> Value {
    let items = match cell {
        Value::Null => return Value::from(""),
        Value::List(items) => items,
        other => return other,
    };

    let mut tags: Vec<(String, String)> = Vec::with_capacity(items.len());
    for item in &items {
        let key = match resolve_field(item, "Key") {
            Ok(Value::Null) | Err(_) => continue,
            Ok(key) => key.to_string(),
        };
        let value = resolve_field(item, "Value")
            .map(|v| v.to_string())
            .unwrap_or_default();
        match tags.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => tags.push((key, value)),
        }
    }

    let joined = tags
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ");
    Value::Str(joined)
}

/// Human-readable byte count with two fractional digits.
pub fn format_number(n: u64) -> String {
    format_number_with(n, 2)
}

/// Human-readable byte count: below 1024 verbatim, then K, M, G, T.
pub fn format_number_with(n: u64, digits: usize) -> String {
    if n < 1024 {
        return n.to_string();
    }

    let mut scaled = n as f64;
    let mut suffix = SIZE_SUFFIXES[0];
    for s in SIZE_SUFFIXES {
        scaled /= 1024.0;
        suffix = s;
        if scaled < 1024.0 {
            break;
        }
    }
    format!("{:.*}{}", digits, scaled, suffix)
}

/// Strip every matching prefix from each name, in the order given.
///
/// ```
/// use tabprint::trim_names;
///
/// let names = trim_names(&["State.Name", "Placement.Zone", "Id"], &["State.", "Placement."]);
/// assert_eq!(names, vec!["Name", "Zone", "Id"]);
/// ```
pub fn trim_names<N, P>(names: &[N], prefixes: &[P]) -> Vec<String>
where
    N: AsRef<str>,
    P: AsRef<str>,
{
    names
        .iter()
        .map(|name| {
            let mut name = name.as_ref();
            for prefix in prefixes {
                if let Some(rest) = name.strip_prefix(prefix.as_ref()) {
                    name = rest;
                }
            }
            name.to_string()
        })
        .collect()
}
