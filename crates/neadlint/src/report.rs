//! Deterministic plain-text report rendering.

use crate::error::Result;
use crate::schema::SchemaDescriptor;
use crate::validation::{Finding, Severity};

/// Renders findings and the schema into the report artifact.
///
/// Output is fully determined by its inputs (same input, byte-identical
/// text) so reports can be snapshot-tested and diffed across runs. The
/// four sections always appear, in fixed order: metadata checks, the
/// schema used, data-validation findings, suggested fixes.
pub struct ReportComposer;

impl ReportComposer {
    pub fn new() -> Self {
        Self
    }

    /// Compose the report.
    ///
    /// `schema` and `data_findings` are `None` when fatal metadata
    /// findings prevented schema construction.
    pub fn compose(
        &self,
        metadata_findings: &[Finding],
        schema: Option<&SchemaDescriptor>,
        data_findings: Option<&[Finding]>,
    ) -> Result<String> {
        let mut lines: Vec<String> = Vec::new();

        lines.push("==== METADATA CHECK ====".to_string());
        if metadata_findings.is_empty() {
            lines.push("OK: metadata checks passed.".to_string());
        } else {
            for finding in metadata_findings {
                lines.push(finding.to_string());
            }
        }

        lines.push(String::new());
        lines.push("==== SCHEMA ====".to_string());
        match schema {
            Some(schema) => lines.push(serde_json::to_string_pretty(schema)?),
            None => lines.push("Schema not built: resolve the metadata issues above first.".to_string()),
        }

        lines.push(String::new());
        lines.push("==== DATA VALIDATION ====".to_string());
        match data_findings {
            Some([]) => lines.push("Data validation: OK".to_string()),
            Some(findings) => {
                lines.push("Data validation: FAILED".to_string());
                for finding in findings {
                    lines.push(finding.to_string());
                }
            }
            None => lines.push("Data validation skipped.".to_string()),
        }

        lines.push(String::new());
        lines.push("==== SUGGESTED FIXES ====".to_string());
        let fatal_metadata = metadata_findings
            .iter()
            .any(|f| f.severity == Severity::Error);
        let has_data_findings = matches!(data_findings, Some(f) if !f.is_empty());
        if fatal_metadata {
            lines.push(
                "- declare the iCSV structural keys in the header (field_delimiter, geometry, srid) \
                 and list every field attribute with one value per field."
                    .to_string(),
            );
        }
        if has_data_findings {
            lines.push(
                "- correct the data cells reported above, or mark missing values with the declared \
                 nodata token."
                    .to_string(),
            );
        }
        if !fatal_metadata && !has_data_findings {
            lines.push("Nothing to fix.".to_string());
        }

        lines.push(String::new());
        lines.push("==== END OF REPORT ====".to_string());
        lines.push(String::new());

        Ok(lines.join("\n"))
    }
}

impl Default for ReportComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnDescriptor, ColumnType};
    use crate::validation::{Finding, FindingCode};

    fn schema() -> SchemaDescriptor {
        SchemaDescriptor::new(
            vec![ColumnDescriptor::new("a", ColumnType::Integer)],
            vec!["NA".to_string()],
        )
    }

    #[test]
    fn test_clean_report() {
        let report = ReportComposer::new()
            .compose(&[], Some(&schema()), Some(&[]))
            .unwrap();
        assert!(report.contains("OK: metadata checks passed."));
        assert!(report.contains("Data validation: OK"));
        assert!(report.contains("Nothing to fix."));
        assert!(report.contains("\"name\": \"a\""));
        assert!(report.ends_with("==== END OF REPORT ====\n"));
    }

    #[test]
    fn test_fatal_metadata_report_has_no_schema_section_body() {
        let findings = vec![Finding::header(
            FindingCode::MissingMetadata,
            Severity::Error,
            "missing required metadata: srid",
        )];
        let report = ReportComposer::new().compose(&findings, None, None).unwrap();
        assert!(report.contains("ERROR [missing_metadata]: missing required metadata: srid"));
        assert!(report.contains("Schema not built"));
        assert!(report.contains("Data validation skipped."));
        assert!(report.contains("declare the iCSV structural keys"));
    }

    #[test]
    fn test_data_findings_rendered_in_order() {
        let data = vec![
            Finding::cell(1, "a", FindingCode::TypeMismatch, "first"),
            Finding::cell(2, "a", FindingCode::TypeMismatch, "second"),
        ];
        let report = ReportComposer::new()
            .compose(&[], Some(&schema()), Some(&data))
            .unwrap();
        let first = report.find("first").unwrap();
        let second = report.find("second").unwrap();
        assert!(first < second);
        assert!(report.contains("Data validation: FAILED"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let composer = ReportComposer::new();
        let findings = vec![Finding::header(
            FindingCode::MissingFields,
            Severity::Error,
            "missing required FIELDS list 'fields'",
        )];
        let a = composer.compose(&findings, None, None).unwrap();
        let b = composer.compose(&findings, None, None).unwrap();
        assert_eq!(a, b);
    }
}
