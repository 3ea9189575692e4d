//! Finding types shared by the consistency checker and the validator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable code for a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCode {
    /// A required metadata key is absent or empty.
    MissingMetadata,
    /// The FIELDS block has no `fields` list.
    MissingFields,
    /// A per-field attribute list disagrees with the `fields` cardinality.
    FieldCountMismatch,
    /// The declared delimiter is outside the usual set.
    UnusualDelimiter,
    /// A cell does not coerce to the column's inferred type.
    TypeMismatch,
    /// A cell violates a column constraint.
    ConstraintViolation,
    /// A row has the wrong number of cells.
    RowLength,
    /// The file could not be read or split at all.
    Unreadable,
}

impl FindingCode {
    /// The snake_case code string used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingCode::MissingMetadata => "missing_metadata",
            FindingCode::MissingFields => "missing_fields",
            FindingCode::FieldCountMismatch => "field_count_mismatch",
            FindingCode::UnusualDelimiter => "unusual_delimiter",
            FindingCode::TypeMismatch => "type_mismatch",
            FindingCode::ConstraintViolation => "constraint_violation",
            FindingCode::RowLength => "row_length",
            FindingCode::Unreadable => "unreadable",
        }
    }
}

/// Severity level of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Worth reviewing, does not block schema construction.
    Warning,
    /// Definite problem; header-level errors block schema construction.
    Error,
}

impl Severity {
    /// Upper-case label used in report lines.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

/// Reference to the field a finding is about, by name or position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRef {
    Name(String),
    Index(usize),
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRef::Name(name) => write!(f, "'{name}'"),
            FieldRef::Index(index) => write!(f, "{index}"),
        }
    }
}

/// One problem found in a file. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// 1-based data row; absent for header-level findings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// Affected field, when one can be named.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldRef>,
    pub code: FindingCode,
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

impl Finding {
    /// A header-level finding with no row or field location.
    pub fn header(code: FindingCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            row: None,
            field: None,
            code,
            severity,
            message: message.into(),
        }
    }

    /// An error finding located at a data cell.
    pub fn cell(
        row: usize,
        field: impl Into<String>,
        code: FindingCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row: Some(row),
            field: Some(FieldRef::Name(field.into())),
            code,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// A file-level finding for a source that could not be read or split.
    pub fn unreadable(message: impl Into<String>) -> Self {
        Self {
            row: None,
            field: None,
            code: FindingCode::Unreadable,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Attach a field reference.
    pub fn with_field(mut self, field: FieldRef) -> Self {
        self.field = Some(field);
        self
    }

    /// Attach a 1-based row number.
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.severity.label(), self.code.as_str())?;
        if let Some(row) = self.row {
            write!(f, " row {row}")?;
            if self.field.is_some() {
                write!(f, ",")?;
            }
        }
        if let Some(field) = &self.field {
            write!(f, " field {field}")?;
        }
        write!(f, ": {}", self.message)
    }
}
