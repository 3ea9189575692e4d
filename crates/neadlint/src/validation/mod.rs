//! Findings and the row-validation capability.

mod finding;
mod validators;

pub use finding::{FieldRef, Finding, FindingCode, Severity};
pub use validators::{TypedValidator, Validator};
