//! neadlint: structural validation gate for iCSV/NEAD scientific data files.
//!
//! An iCSV/NEAD file carries a commented metadata header, a field-attribute
//! table and delimited data rows in a single text file. neadlint splits the
//! file, cross-checks the declared metadata against the field attributes,
//! infers a canonical per-column schema, validates the data rows against it
//! and composes a deterministic plain-text report.
//!
//! # Core Principles
//!
//! - **Detection, not repair**: invalid data is reported, never rewritten
//! - **Findings are data**: problems are enumerated exhaustively, never
//!   thrown as control flow
//! - **Batch-safe**: one broken file never aborts the rest of a batch
//!
//! # Example
//!
//! ```no_run
//! use neadlint::Linter;
//!
//! let linter = Linter::new();
//! let outcome = linter.check_file("station.icsv").unwrap();
//!
//! println!("{}", outcome.report);
//! if let Some(schema) = &outcome.schema {
//!     println!("Columns: {}", schema.columns.len());
//! }
//! ```

pub mod consistency;
pub mod error;
pub mod inference;
pub mod input;
pub mod report;
pub mod schema;
pub mod validation;

mod linter;

pub use crate::linter::{FileOutcome, Linter, LinterConfig};
pub use consistency::ConsistencyChecker;
pub use error::{NeadError, Result};
pub use inference::TypeInferencer;
pub use input::{
    DataBlock, DataRow, FieldAttributeTable, HeaderDialect, MetadataBlockSplitter, MetadataMap,
    MetadataParser, SourceMetadata,
};
pub use report::ReportComposer;
pub use schema::{
    ColumnDescriptor, ColumnType, Constraint, ConventionTable, NameConvention, SchemaBuilder,
    SchemaDescriptor,
};
pub use validation::{FieldRef, Finding, FindingCode, Severity, TypedValidator, Validator};
