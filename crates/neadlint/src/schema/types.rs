//! Core type definitions for the schema descriptor.

use serde::{Deserialize, Serialize};

/// Canonical semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// ISO-8601 date/time values.
    Datetime,
    /// Whole numbers.
    Integer,
    /// Decimal numbers.
    Number,
    /// Anything else; the safe default.
    String,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Number)
    }

    /// Lower-case name as it appears in serialized descriptors.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Datetime => "datetime",
            ColumnType::Integer => "integer",
            ColumnType::Number => "number",
            ColumnType::String => "string",
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::String
    }
}

/// A constraint on column values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
    /// The cell must hold a non-missing value.
    Required,
    /// Numeric values must not fall below this bound.
    Minimum { value: f64 },
    /// Numeric values must not exceed this bound.
    Maximum { value: f64 },
    /// Values must come from a closed set.
    Enum { values: Vec<String> },
}
