//! Table-level schema descriptor: the contract handed to the validator.

use serde::{Deserialize, Serialize};

use super::column::ColumnDescriptor;

/// Ordered column descriptors plus the missing-value sentinel tokens.
///
/// Serializable, so a schema can be written once and reused across
/// repeated validations of the same logical dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    /// Descriptors in field order.
    pub columns: Vec<ColumnDescriptor>,
    /// Tokens that mean "missing value" in any cell.
    pub missing_values: Vec<String>,
}

impl SchemaDescriptor {
    /// Create a descriptor from columns and sentinel tokens.
    pub fn new(columns: Vec<ColumnDescriptor>, missing_values: Vec<String>) -> Self {
        Self {
            columns,
            missing_values,
        }
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Look up a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether a raw cell value counts as missing. The empty string is
    /// always missing, whatever the configured sentinels say.
    pub fn is_missing(&self, value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty() || self.missing_values.iter().any(|s| s == trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnType;

    #[test]
    fn test_missing_values() {
        let schema = SchemaDescriptor::new(
            vec![ColumnDescriptor::new("a", ColumnType::Integer)],
            vec!["-999".to_string()],
        );
        assert!(schema.is_missing("-999"));
        assert!(schema.is_missing(" -999 "));
        assert!(schema.is_missing(""));
        assert!(!schema.is_missing("0"));
    }

    #[test]
    fn test_get_column() {
        let schema = SchemaDescriptor::new(
            vec![
                ColumnDescriptor::new("a", ColumnType::Integer),
                ColumnDescriptor::new("b", ColumnType::String),
            ],
            Vec::new(),
        );
        assert_eq!(schema.column_count(), 2);
        assert!(schema.get_column("b").is_some());
        assert!(schema.get_column("c").is_none());
    }
}
