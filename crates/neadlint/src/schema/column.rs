//! Per-column schema descriptor.

use serde::{Deserialize, Serialize};

use super::types::{ColumnType, Constraint};

/// Schema for a single column, built in field order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name.
    pub name: String,
    /// Inferred semantic type.
    #[serde(rename = "type")]
    pub inferred_type: ColumnType,
    /// Annotation from a `standard_name`-style attribute, when declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Constraints the validator enforces for this column.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
}

impl ColumnDescriptor {
    /// Create a descriptor with no description or constraints.
    pub fn new(name: impl Into<String>, inferred_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            inferred_type,
            description: None,
            constraints: Vec::new(),
        }
    }

    /// Whether a non-missing value is mandatory.
    pub fn is_required(&self) -> bool {
        self.constraints.contains(&Constraint::Required)
    }

    /// The declared lower bound, if any.
    pub fn minimum(&self) -> Option<f64> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Minimum { value } => Some(*value),
            _ => None,
        })
    }

    /// The declared upper bound, if any.
    pub fn maximum(&self) -> Option<f64> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Maximum { value } => Some(*value),
            _ => None,
        })
    }

    /// The closed value set, if any.
    pub fn allowed_values(&self) -> Option<&[String]> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::Enum { values } => Some(values.as_slice()),
            _ => None,
        })
    }
}
