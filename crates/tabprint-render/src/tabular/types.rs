//! Column metadata for typed tables.

use serde::{Deserialize, Serialize};

use crate::style::Tint;

/// Declared type of a column, used to color its header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Boolean,
    Integer,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Float,
    Double,
    String,
}

impl ColumnType {
    /// Header color for this type family.
    pub fn tint(self) -> Tint {
        match self {
            ColumnType::Boolean => Tint::Blue,
            ColumnType::Integer
            | ColumnType::Uint8
            | ColumnType::Int16
            | ColumnType::Uint16
            | ColumnType::Int32
            | ColumnType::Uint32
            | ColumnType::Int64 => Tint::Yellow,
            ColumnType::Float | ColumnType::Double => Tint::White,
            ColumnType::String => Tint::Green,
        }
    }
}

/// A named, typed column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        ColumnSpec {
            name: name.into(),
            kind,
        }
    }

    /// The implicit leading row-index column.
    pub fn row_index() -> Self {
        ColumnSpec::new(ROW_COLUMN, ColumnType::Float)
    }
}

/// Header of the implicit row-index column.
pub const ROW_COLUMN: &str = "Row";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_family_shares_a_tint() {
        for kind in [
            ColumnType::Integer,
            ColumnType::Uint8,
            ColumnType::Int16,
            ColumnType::Uint16,
            ColumnType::Int32,
            ColumnType::Uint32,
            ColumnType::Int64,
        ] {
            assert_eq!(kind.tint(), Tint::Yellow);
        }
        assert_eq!(ColumnType::Double.tint(), ColumnType::Float.tint());
    }

    #[test]
    fn column_spec_deserializes() {
        let specs: Vec<ColumnSpec> = serde_json::from_str(
            r#"[{"name": "size", "type": "int64"}, {"name": "label", "type": "string"}]"#,
        )
        .unwrap();
        assert_eq!(specs[0], ColumnSpec::new("size", ColumnType::Int64));
        assert_eq!(specs[1].kind, ColumnType::String);
    }
}
