//! Structural consistency checks between metadata and field attributes.

use crate::input::{FieldAttributeTable, MetadataMap};
use crate::validation::{FieldRef, Finding, FindingCode, Severity};

/// Delimiters considered ordinary for an iCSV header.
const USUAL_DELIMITERS: &[&str] = &[",", ";", "\t", "|", ":", " "];

/// Validates that required metadata keys exist and that every per-field
/// attribute list matches the cardinality of the declared `fields` list.
///
/// Checks are enumerated exhaustively: one file yields every problem it
/// has, not just the first. An empty result means the header is
/// consistent and schema construction may proceed.
pub struct ConsistencyChecker {
    required_keys: Vec<String>,
}

impl ConsistencyChecker {
    /// Checker with the default required-key set
    /// (`field_delimiter`, `geometry`, `srid`).
    pub fn new() -> Self {
        Self::with_required_keys(
            ["field_delimiter", "geometry", "srid"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        )
    }

    /// Checker with a custom required-key set.
    pub fn with_required_keys(required_keys: Vec<String>) -> Self {
        Self { required_keys }
    }

    /// Run all checks in order and collect the findings.
    pub fn check(&self, metadata: &MetadataMap, attributes: &FieldAttributeTable) -> Vec<Finding> {
        let mut findings = Vec::new();

        for key in &self.required_keys {
            match metadata.get(key) {
                None => findings.push(Finding::header(
                    FindingCode::MissingMetadata,
                    Severity::Error,
                    format!("missing required metadata: {key}"),
                )),
                Some(value) if value.trim().is_empty() => findings.push(Finding::header(
                    FindingCode::MissingMetadata,
                    Severity::Error,
                    format!("metadata key '{key}' is present but empty"),
                )),
                Some(_) => {}
            }
        }

        if let Some(delimiter) = metadata.get("field_delimiter") {
            if !delimiter.trim().is_empty() && !is_usual_delimiter(delimiter) {
                findings.push(Finding::header(
                    FindingCode::UnusualDelimiter,
                    Severity::Warning,
                    format!("unusual field_delimiter '{delimiter}'"),
                ));
            }
        }

        let Some(fields) = attributes.get("fields") else {
            findings.push(Finding::header(
                FindingCode::MissingFields,
                Severity::Error,
                "missing required FIELDS list 'fields'",
            ));
            // Without a fields list there is nothing to compare against.
            return findings;
        };

        let expected = fields.len();
        for (key, values) in attributes {
            if key == "fields" || values.is_empty() {
                continue;
            }
            if values.len() != expected {
                findings.push(
                    Finding::header(
                        FindingCode::FieldCountMismatch,
                        Severity::Error,
                        format!("expected {expected} values, found {}", values.len()),
                    )
                    .with_field(FieldRef::Name(key.clone())),
                );
            }
        }

        findings
    }

    /// Whether any finding blocks schema construction.
    pub fn is_fatal(findings: &[Finding]) -> bool {
        findings.iter().any(|f| f.severity == Severity::Error)
    }
}

impl Default for ConsistencyChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn is_usual_delimiter(delimiter: &str) -> bool {
    let normalized = crate::input::field_delimiter(
        &[("field_delimiter".to_string(), delimiter.to_string())]
            .into_iter()
            .collect(),
    );
    USUAL_DELIMITERS.contains(&normalized.to_string().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{FieldAttributeTable, MetadataMap};

    fn metadata(pairs: &[(&str, &str)]) -> MetadataMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn attributes(pairs: &[(&str, &[&str])]) -> FieldAttributeTable {
        pairs
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    fn complete_metadata() -> MetadataMap {
        metadata(&[
            ("field_delimiter", ","),
            ("geometry", "POINTZ (7.5 46.0 2540)"),
            ("srid", "EPSG:4326"),
        ])
    }

    #[test]
    fn test_consistent_header_passes() {
        let attrs = attributes(&[("fields", &["a", "b"]), ("standard_name", &["x", "y"])]);
        let findings = ConsistencyChecker::new().check(&complete_metadata(), &attrs);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_missing_srid_yields_one_finding() {
        let meta = metadata(&[("field_delimiter", ","), ("geometry", "POINT (7.5 46.0)")]);
        let attrs = attributes(&[("fields", &["a"])]);
        let findings = ConsistencyChecker::new().check(&meta, &attrs);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, FindingCode::MissingMetadata);
        assert!(findings[0].message.contains("srid"));
        assert!(ConsistencyChecker::is_fatal(&findings));
    }

    #[test]
    fn test_all_missing_keys_enumerated() {
        let findings = ConsistencyChecker::new().check(
            &MetadataMap::new(),
            &attributes(&[("fields", &["a"])]),
        );
        let missing = findings
            .iter()
            .filter(|f| f.code == FindingCode::MissingMetadata)
            .count();
        assert_eq!(missing, 3);
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut meta = complete_metadata();
        meta.insert("srid".to_string(), "  ".to_string());
        let findings = ConsistencyChecker::new().check(&meta, &attributes(&[("fields", &["a"])]));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("present but empty"));
    }

    #[test]
    fn test_missing_fields_skips_attribute_checks() {
        let attrs = attributes(&[("standard_name", &["x", "y", "z"])]);
        let findings = ConsistencyChecker::new().check(&complete_metadata(), &attrs);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, FindingCode::MissingFields);
    }

    #[test]
    fn test_field_count_mismatch_names_attribute_and_counts() {
        let attrs = attributes(&[("fields", &["A", "B"]), ("standard_name", &["x", "y", "z"])]);
        let findings = ConsistencyChecker::new().check(&complete_metadata(), &attrs);
        assert_eq!(findings.len(), 1);
        let finding = &findings[0];
        assert_eq!(finding.code, FindingCode::FieldCountMismatch);
        assert_eq!(
            finding.field,
            Some(FieldRef::Name("standard_name".to_string()))
        );
        assert!(finding.message.contains("expected 2"));
        assert!(finding.message.contains("found 3"));
    }

    #[test]
    fn test_empty_attribute_list_is_tolerated() {
        let attrs = attributes(&[("fields", &["a", "b"]), ("units", &[] as &[&str])]);
        let findings = ConsistencyChecker::new().check(&complete_metadata(), &attrs);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_unusual_delimiter_is_nonfatal_warning() {
        let mut meta = complete_metadata();
        meta.insert("field_delimiter".to_string(), "@".to_string());
        let findings = ConsistencyChecker::new().check(&meta, &attributes(&[("fields", &["a"])]));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, FindingCode::UnusualDelimiter);
        assert!(!ConsistencyChecker::is_fatal(&findings));
    }

    #[test]
    fn test_custom_required_keys() {
        let checker = ConsistencyChecker::with_required_keys(vec!["station".to_string()]);
        let findings = checker.check(&complete_metadata(), &attributes(&[("fields", &["a"])]));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("station"));
    }
}
