//! Input splitting and header parsing.

mod header;
mod source;
mod splitter;

pub use header::{field_delimiter, FieldAttributeTable, MetadataMap, MetadataParser};
pub use source::{DataBlock, DataRow, SourceMetadata};
pub use splitter::{HeaderDialect, MetadataBlockSplitter, SplitDocument, SplitterConfig};
