//! Schema descriptor types and construction.

mod builder;
mod column;
mod descriptor;
mod types;

pub use builder::{ConventionTable, NameConvention, SchemaBuilder};
pub use column::ColumnDescriptor;
pub use descriptor::SchemaDescriptor;
pub use types::{ColumnType, Constraint};
