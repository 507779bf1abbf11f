//! Field sources and dotted-path resolution.
//!
//! Anything a table row is built from implements [`Resource`]. A resource can
//! answer attribute-style access (an object's own fields), key-style access
//! (a mapping's entries), or both. [`resolve_field`] walks a dotted path such
//! as `State.Name` one segment at a time, trying attribute access first and
//! falling back to key access.
//!
//! # Example
//!
//! ```
//! use tabprint::{resolve_field, Resource, SourceError, Value};
//!
//! #[derive(Debug)]
//! struct Instance {
//!     id: String,
//!     state: Value,
//! }
//!
//! impl Resource for Instance {
//!     fn attribute(&self, name: &str) -> Option<Result<Value, SourceError>> {
//!         match name {
//!             "InstanceId" => Some(Ok(Value::from(self.id.as_str()))),
//!             "State" => Some(Ok(self.state.clone())),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let instance = Instance {
//!     id: "i-0abc".into(),
//!     state: Value::map([("Name", "running")]),
//! };
//! assert_eq!(resolve_field(&instance, "State.Name").unwrap(), Value::from("running"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::TabulateError;
use crate::value::Value;

/// Error code a data source reports when a permission is missing.
pub const ACCESS_DENIED_CODE: &str = "AccessDenied";

/// An error raised by a data source while a field is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    /// Structured error code from the service response, if any.
    pub code: Option<String>,
    pub message: String,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}: {}", code, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for SourceError {}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        SourceError {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        SourceError {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        SourceError::with_code(ACCESS_DENIED_CODE, message)
    }

    pub fn is_access_denied(&self) -> bool {
        self.code.as_deref() == Some(ACCESS_DENIED_CODE)
    }
}

/// Something fields can be read from.
///
/// Each accessor returns `None` when that style of access is not supported
/// for `name`, `Some(Ok(_))` with the value, or `Some(Err(_))` when the
/// underlying source failed.
pub trait Resource: fmt::Debug {
    /// Attribute-style access.
    fn attribute(&self, name: &str) -> Option<Result<Value, SourceError>>;

    /// Key-style access. Mappings return `Null` for missing keys.
    fn key(&self, _name: &str) -> Option<Result<Value, SourceError>> {
        None
    }
}

/// A collection whose members are displayed by name.
pub trait NamedChildren: fmt::Debug {
    /// Names of all members. May fail like any other data-source call.
    fn child_names(&self) -> Result<Vec<String>, SourceError>;
}

impl Resource for Value {
    fn attribute(&self, name: &str) -> Option<Result<Value, SourceError>> {
        match self {
            Value::Object(resource) => resource.attribute(name),
            _ => None,
        }
    }

    fn key(&self, name: &str) -> Option<Result<Value, SourceError>> {
        match self {
            Value::Map(map) => Some(Ok(map.get(name).cloned().unwrap_or_default())),
            Value::Object(resource) => resource.key(name),
            _ => None,
        }
    }
}

impl Resource for BTreeMap<String, Value> {
    fn attribute(&self, _name: &str) -> Option<Result<Value, SourceError>> {
        None
    }

    fn key(&self, name: &str) -> Option<Result<Value, SourceError>> {
        Some(Ok(self.get(name).cloned().unwrap_or_default()))
    }
}

impl Resource for IndexMap<String, Value> {
    fn attribute(&self, _name: &str) -> Option<Result<Value, SourceError>> {
        None
    }

    fn key(&self, name: &str) -> Option<Result<Value, SourceError>> {
        Some(Ok(self.get(name).cloned().unwrap_or_default()))
    }
}

impl Resource for serde_json::Value {
    fn attribute(&self, _name: &str) -> Option<Result<Value, SourceError>> {
        None
    }

    fn key(&self, name: &str) -> Option<Result<Value, SourceError>> {
        match self {
            serde_json::Value::Object(map) => {
                Some(Ok(map.get(name).map(Value::from).unwrap_or_default()))
            }
            _ => None,
        }
    }
}

impl<R: Resource + ?Sized> Resource for &R {
    fn attribute(&self, name: &str) -> Option<Result<Value, SourceError>> {
        (**self).attribute(name)
    }

    fn key(&self, name: &str) -> Option<Result<Value, SourceError>> {
        (**self).key(name)
    }
}

impl<R: Resource + ?Sized> Resource for Box<R> {
    fn attribute(&self, name: &str) -> Option<Result<Value, SourceError>> {
        (**self).attribute(name)
    }

    fn key(&self, name: &str) -> Option<Result<Value, SourceError>> {
        (**self).key(name)
    }
}

impl<R: Resource + ?Sized> Resource for Arc<R> {
    fn attribute(&self, name: &str) -> Option<Result<Value, SourceError>> {
        (**self).attribute(name)
    }

    fn key(&self, name: &str) -> Option<Result<Value, SourceError>> {
        (**self).key(name)
    }
}

/// Resolve a dotted field path against `item`.
///
/// Each segment is read with attribute access, then key access. A segment
/// neither supports is a [`TabulateError::FieldResolution`]; data-source
/// errors are returned as [`TabulateError::Source`].
pub fn resolve_field(item: &dyn Resource, field: &str) -> Result<Value, TabulateError> {
    let mut current: Option<Value> = None;

    for segment in field.split('.') {
        let target: &dyn Resource = match &current {
            Some(value) => value,
            None => item,
        };
        let next = match target
            .attribute(segment)
            .or_else(|| target.key(segment))
        {
            Some(result) => result?,
            None => {
                return Err(TabulateError::FieldResolution {
                    field: field.to_string(),
                    segment: segment.to_string(),
                    item: format!("{:?}", target),
                })
            }
        };
        current = Some(next);
    }

    Ok(current.unwrap_or_default())
}
