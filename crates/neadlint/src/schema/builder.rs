//! Schema construction from metadata, field attributes and sampled data.

use crate::inference::TypeInferencer;
use crate::input::{DataBlock, FieldAttributeTable, MetadataMap};

use super::column::ColumnDescriptor;
use super::descriptor::SchemaDescriptor;
use super::types::Constraint;

/// FIELDS attribute carrying per-column declared types.
const TYPES_ATTRIBUTE: &str = "database_fields_data_types";

/// FIELDS attribute carrying per-column annotations.
const DESCRIPTION_ATTRIBUTE: &str = "standard_name";

/// Name-based constraints for conventional physical quantities.
#[derive(Debug, Clone)]
pub struct NameConvention {
    /// Column name the convention applies to (matched case-insensitively).
    pub name: String,
    /// Whether the column must always hold a value.
    pub required: bool,
    /// Closed lower bound.
    pub minimum: Option<f64>,
    /// Closed upper bound.
    pub maximum: Option<f64>,
}

/// Fixed table of name-based conventions.
///
/// The defaults cover the station-data names this gate was built for:
/// `timestamp` is mandatory, relative humidity `RH` lives in [0, 1] and
/// air temperature `TA` in [-100, 60] degrees Celsius.
#[derive(Debug, Clone)]
pub struct ConventionTable {
    entries: Vec<NameConvention>,
}

impl ConventionTable {
    /// An empty table (no name-based constraints at all).
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a table from explicit entries.
    pub fn with_entries(entries: Vec<NameConvention>) -> Self {
        Self { entries }
    }

    /// Find the convention matching a column name, if any.
    pub fn lookup(&self, name: &str) -> Option<&NameConvention> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }
}

impl Default for ConventionTable {
    fn default() -> Self {
        Self::with_entries(vec![
            NameConvention {
                name: "timestamp".to_string(),
                required: true,
                minimum: None,
                maximum: None,
            },
            NameConvention {
                name: "RH".to_string(),
                required: false,
                minimum: Some(0.0),
                maximum: Some(1.0),
            },
            NameConvention {
                name: "TA".to_string(),
                required: false,
                minimum: Some(-100.0),
                maximum: Some(60.0),
            },
        ])
    }
}

/// Merges declared metadata, field attributes, inferred types and name
/// conventions into a [`SchemaDescriptor`].
///
/// Must only run on a header the [`crate::ConsistencyChecker`] passed:
/// it assumes the `fields` list exists and attribute cardinalities agree.
pub struct SchemaBuilder {
    inferencer: TypeInferencer,
    conventions: ConventionTable,
    default_missing_values: Vec<String>,
}

impl SchemaBuilder {
    /// Builder with default conventions and sentinels (`""`, `"NA"`).
    pub fn new() -> Self {
        Self {
            inferencer: TypeInferencer::new(),
            conventions: ConventionTable::default(),
            default_missing_values: vec![String::new(), "NA".to_string()],
        }
    }

    /// Builder with explicit policy.
    pub fn with_policy(
        inferencer: TypeInferencer,
        conventions: ConventionTable,
        default_missing_values: Vec<String>,
    ) -> Self {
        Self {
            inferencer,
            conventions,
            default_missing_values,
        }
    }

    /// Build the schema descriptor for a consistent header.
    pub fn build(
        &self,
        metadata: &MetadataMap,
        attributes: &FieldAttributeTable,
        data: &DataBlock,
    ) -> SchemaDescriptor {
        let names: &[String] = attributes
            .get("fields")
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        let declared_types = attributes.get(TYPES_ATTRIBUTE);
        let descriptions = attributes.get(DESCRIPTION_ATTRIBUTE);

        let missing_values = match metadata.get("nodata") {
            Some(nodata) if !nodata.trim().is_empty() => vec![nodata.trim().to_string()],
            _ => self.default_missing_values.clone(),
        };

        let columns = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let declared = declared_types.and_then(|t| t.get(i)).map(String::as_str);
                let inferred_type =
                    self.inferencer
                        .infer(declared, data.column_values(i), &missing_values);

                let mut column = ColumnDescriptor::new(name.clone(), inferred_type);
                column.description = descriptions
                    .and_then(|d| d.get(i))
                    .filter(|d| !d.trim().is_empty())
                    .map(|d| d.trim().to_string());

                if let Some(convention) = self.conventions.lookup(name) {
                    if convention.required {
                        column.constraints.push(Constraint::Required);
                    }
                    if let Some(value) = convention.minimum {
                        column.constraints.push(Constraint::Minimum { value });
                    }
                    if let Some(value) = convention.maximum {
                        column.constraints.push(Constraint::Maximum { value });
                    }
                }
                column
            })
            .collect();

        SchemaDescriptor::new(columns, missing_values)
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
