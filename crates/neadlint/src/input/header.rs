//! Header parsing: metadata key/value pairs and the field-attribute table.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use super::splitter::{HeaderDialect, SplitDocument};

/// Flat `key -> value` map parsed from the metadata block.
pub type MetadataMap = IndexMap<String, String>;

/// `attribute -> one value per column` table parsed from the FIELDS block.
pub type FieldAttributeTable = IndexMap<String, Vec<String>>;

/// Freeform `key : value` line.
static FREEFORM_KEY_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([^:]+?)\s*:\s*(.*)$").unwrap());

/// Freeform heading-only line such as `Required:`.
static FREEFORM_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z -]+:\s*$").unwrap());

/// Splitter for a freeform `fields` metadata value.
static FREEFORM_FIELD_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;|:]+").unwrap());

/// Parses split header lines into a [`MetadataMap`] and a
/// [`FieldAttributeTable`].
///
/// The FIELDS block is split with the delimiter declared by
/// `field_delimiter`, which is itself a metadata key. Parsing is therefore
/// two-pass: metadata first, field attributes second, so the declaration
/// is honored regardless of where it appears in the header.
pub struct MetadataParser;

impl MetadataParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a split document into metadata and field attributes.
    pub fn parse(&self, doc: &SplitDocument) -> (MetadataMap, FieldAttributeTable) {
        let metadata = match doc.dialect {
            HeaderDialect::SectionMarker => parse_key_equals_value(&doc.metadata_lines),
            HeaderDialect::Freeform => parse_key_colon_value(&doc.metadata_lines),
        };

        let delimiter = field_delimiter(&metadata);
        let attributes = match doc.dialect {
            HeaderDialect::SectionMarker => parse_field_attributes(&doc.field_lines, delimiter),
            HeaderDialect::Freeform => freeform_field_attributes(&metadata),
        };

        (metadata, attributes)
    }
}

impl Default for MetadataParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the declared field delimiter, defaulting to a comma.
///
/// Named forms seen in the wild (`comma`, `tab`, ...) are normalized to
/// their single-character equivalents.
pub fn field_delimiter(metadata: &MetadataMap) -> char {
    let declared = match metadata.get("field_delimiter") {
        Some(v) if !v.trim().is_empty() => v.trim(),
        _ => return ',',
    };
    match declared.to_ascii_lowercase().as_str() {
        "comma" => ',',
        "semicolon" => ';',
        "tab" | "\\t" => '\t',
        "colon" => ':',
        "pipe" => '|',
        "space" => ' ',
        other => other.chars().next().unwrap_or(','),
    }
}

/// Section-marker metadata lines: `key = value`, last write wins.
fn parse_key_equals_value(lines: &[String]) -> MetadataMap {
    let mut metadata = MetadataMap::new();
    for line in lines {
        if let Some((key, value)) = line.split_once('=') {
            metadata.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    metadata
}

/// Freeform metadata lines: `key : value`; heading-only lines are section
/// labels, not keys. Lines with no recognizable shape are preserved under
/// a synthetic key so the metadata echo stays complete.
fn parse_key_colon_value(lines: &[String]) -> MetadataMap {
    let mut metadata = MetadataMap::new();
    for line in lines {
        if FREEFORM_HEADING.is_match(line) {
            continue;
        }
        match FREEFORM_KEY_VALUE.captures(line) {
            Some(caps) => {
                metadata.insert(caps[1].trim().to_string(), caps[2].trim().to_string());
            }
            None => {
                let key = format!("_meta_line_{}", metadata.len() + 1);
                metadata.insert(key, line.trim().to_string());
            }
        }
    }
    metadata
}

/// FIELDS-block lines: `key = v1<delim>v2<delim>...`.
fn parse_field_attributes(lines: &[String], delimiter: char) -> FieldAttributeTable {
    let mut attributes = FieldAttributeTable::new();
    for line in lines {
        if let Some((key, value)) = line.split_once('=') {
            let values = value
                .trim()
                .split(delimiter)
                .map(|v| v.trim().to_string())
                .collect();
            attributes.insert(key.trim().to_string(), values);
        }
    }
    attributes
}

/// Freeform files have no FIELDS block; a `fields` metadata value split on
/// any common delimiter is the closest equivalent.
fn freeform_field_attributes(metadata: &MetadataMap) -> FieldAttributeTable {
    let mut attributes = FieldAttributeTable::new();
    if let Some(value) = metadata.get("fields") {
        let values: Vec<String> = FREEFORM_FIELD_SPLIT
            .split(value)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
            .collect();
        if !values.is_empty() {
            attributes.insert("fields".to_string(), values);
        }
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MetadataBlockSplitter;

    fn parse(text: &str) -> (MetadataMap, FieldAttributeTable) {
        let doc = MetadataBlockSplitter::new().split(text);
        MetadataParser::new().parse(&doc)
    }

    #[test]
    fn test_parse_section_header() {
        let text = "\
# [METADATA]
# field_delimiter = |
# srid = EPSG:4326
# [FIELDS]
# fields = TIMESTAMP|TA|RH
# standard_name = time|air_temperature|relative_humidity
# [DATA]
";
        let (metadata, attributes) = parse(text);
        assert_eq!(metadata.get("srid").map(String::as_str), Some("EPSG:4326"));
        assert_eq!(attributes["fields"], vec!["TIMESTAMP", "TA", "RH"]);
        assert_eq!(attributes["standard_name"].len(), 3);
    }

    #[test]
    fn test_delimiter_declared_after_fields_block() {
        // [FIELDS] appearing before [METADATA] must still be split with
        // the declared delimiter (two-pass parse).
        let text = "\
# [FIELDS]
# fields = a;b;c
# [METADATA]
# field_delimiter = ;
# [DATA]
";
        let (_, attributes) = parse(text);
        assert_eq!(attributes["fields"], vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let text = "# [METADATA]\n# station = old\n# station = new\n# [DATA]\n";
        let (metadata, _) = parse(text);
        assert_eq!(metadata.get("station").map(String::as_str), Some("new"));
    }

    #[test]
    fn test_named_delimiters() {
        let mut metadata = MetadataMap::new();
        assert_eq!(field_delimiter(&metadata), ',');
        for (name, ch) in [
            ("comma", ','),
            ("semicolon", ';'),
            ("tab", '\t'),
            ("colon", ':'),
            ("pipe", '|'),
            ("|", '|'),
        ] {
            metadata.insert("field_delimiter".to_string(), name.to_string());
            assert_eq!(field_delimiter(&metadata), ch, "for {name}");
        }
    }

    #[test]
    fn test_freeform_heading_lines_discarded() {
        let text = "METADATA:\nRequired:\nstation: DW1\nData:\n1,2\n2,3\n";
        let (metadata, _) = parse(text);
        assert!(!metadata.contains_key("Required"));
        assert_eq!(metadata.get("station").map(String::as_str), Some("DW1"));
    }

    #[test]
    fn test_freeform_unmatched_line_kept_under_synthetic_key() {
        let text = "METADATA:\nstation DW1 no separator\nData:\n1,2\n2,3\n";
        let (metadata, _) = parse(text);
        assert_eq!(
            metadata.get("_meta_line_1").map(String::as_str),
            Some("station DW1 no separator")
        );
    }

    #[test]
    fn test_freeform_fields_from_metadata_value() {
        let text = "METADATA:\nfields: a, b, c\nData:\n1,2,3\n4,5,6\n";
        let (_, attributes) = parse(text);
        assert_eq!(attributes["fields"], vec!["a", "b", "c"]);
    }
}
