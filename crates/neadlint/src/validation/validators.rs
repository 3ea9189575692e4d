//! Row validation against a schema descriptor.

use crate::inference::parse_datetime;
use crate::input::DataRow;
use crate::schema::{ColumnDescriptor, ColumnType, SchemaDescriptor};

use super::finding::{Finding, FindingCode};

/// Capability consumed by the pipeline: check typed values against a
/// schema and return findings, exhaustively and without panicking.
pub trait Validator {
    fn validate(&self, rows: &[DataRow], schema: &SchemaDescriptor) -> Vec<Finding>;
}

/// Default validator: coerces each cell by its column's inferred type and
/// enforces the column constraints. Sentinel cells are skipped except for
/// required columns.
pub struct TypedValidator;

impl TypedValidator {
    pub fn new() -> Self {
        Self
    }

    fn check_cell(
        &self,
        row_number: usize,
        column: &ColumnDescriptor,
        value: &str,
        schema: &SchemaDescriptor,
        findings: &mut Vec<Finding>,
    ) {
        if schema.is_missing(value) {
            if column.is_required() {
                findings.push(Finding::cell(
                    row_number,
                    &column.name,
                    FindingCode::ConstraintViolation,
                    "required cell is missing",
                ));
            }
            return;
        }

        let value = value.trim();
        let numeric = match column.inferred_type {
            ColumnType::Datetime => {
                if parse_datetime(value).is_none() {
                    findings.push(Finding::cell(
                        row_number,
                        &column.name,
                        FindingCode::TypeMismatch,
                        format!("value '{value}' is not a valid datetime"),
                    ));
                }
                None
            }
            ColumnType::Integer => match value.parse::<i64>() {
                Ok(n) => Some(n as f64),
                Err(_) => {
                    findings.push(Finding::cell(
                        row_number,
                        &column.name,
                        FindingCode::TypeMismatch,
                        format!("value '{value}' is not a valid integer"),
                    ));
                    None
                }
            },
            ColumnType::Number => match value.parse::<f64>() {
                Ok(n) => Some(n),
                Err(_) => {
                    findings.push(Finding::cell(
                        row_number,
                        &column.name,
                        FindingCode::TypeMismatch,
                        format!("value '{value}' is not a valid number"),
                    ));
                    None
                }
            },
            ColumnType::String => None,
        };

        if let Some(n) = numeric {
            if let Some(min) = column.minimum() {
                if n < min {
                    findings.push(Finding::cell(
                        row_number,
                        &column.name,
                        FindingCode::ConstraintViolation,
                        format!("value {value} is below the minimum {min}"),
                    ));
                }
            }
            if let Some(max) = column.maximum() {
                if n > max {
                    findings.push(Finding::cell(
                        row_number,
                        &column.name,
                        FindingCode::ConstraintViolation,
                        format!("value {value} is above the maximum {max}"),
                    ));
                }
            }
        }

        if let Some(allowed) = column.allowed_values() {
            if !allowed.iter().any(|a| a == value) {
                findings.push(Finding::cell(
                    row_number,
                    &column.name,
                    FindingCode::ConstraintViolation,
                    format!("value '{value}' is not one of the allowed values"),
                ));
            }
        }
    }
}

impl Validator for TypedValidator {
    fn validate(&self, rows: &[DataRow], schema: &SchemaDescriptor) -> Vec<Finding> {
        let mut findings = Vec::new();
        let expected = schema.column_count();

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;
            if row.len() != expected {
                findings.push(
                    Finding::header(
                        FindingCode::RowLength,
                        super::finding::Severity::Error,
                        format!("expected {expected} cells, found {}", row.len()),
                    )
                    .with_row(row_number),
                );
            }

            for (column, value) in schema.columns.iter().zip(row.iter()) {
                self.check_cell(row_number, column, value, schema, &mut findings);
            }
        }

        findings
    }
}

impl Default for TypedValidator {
    fn default() -> Self {
        Self::new()
    }
}
