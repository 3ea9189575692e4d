//! Heuristic column type inference.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::ColumnType;

static INTEGER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+$").unwrap());

static DECIMAL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").unwrap());

/// Datetime layouts accepted besides RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Infers a canonical column type from a declared type string or from a
/// sample of raw values.
///
/// Declared types win outright; sampling only runs when no declaration is
/// available. The datetime check runs before the numeric checks so that a
/// timestamp column is never mistaken for a string of digits, and a purely
/// numeric column never becomes a datetime just by looking date-shaped.
#[derive(Debug, Clone)]
pub struct TypeInferencer {
    /// Maximum non-sentinel values examined per column.
    sample_size: usize,
}

impl TypeInferencer {
    pub fn new() -> Self {
        Self { sample_size: 50 }
    }

    pub fn with_sample_size(sample_size: usize) -> Self {
        Self { sample_size }
    }

    /// Infer from a declared type when present, otherwise from samples.
    pub fn infer<'a>(
        &self,
        declared: Option<&str>,
        samples: impl Iterator<Item = &'a str>,
        sentinels: &[String],
    ) -> ColumnType {
        match declared {
            Some(decl) if !decl.trim().is_empty() => Self::from_declared(decl),
            _ => self.from_samples(samples, sentinels),
        }
    }

    /// Map a declared type string to a canonical type.
    pub fn from_declared(declared: &str) -> ColumnType {
        let decl = declared.trim().to_ascii_lowercase();
        if decl.contains("timestamp") || decl.contains("date") {
            ColumnType::Datetime
        } else if matches!(decl.as_str(), "real" | "float" | "double") {
            ColumnType::Number
        } else if matches!(decl.as_str(), "integer" | "int") {
            ColumnType::Integer
        } else {
            ColumnType::String
        }
    }

    /// Infer from the first `sample_size` non-sentinel values.
    pub fn from_samples<'a>(
        &self,
        values: impl Iterator<Item = &'a str>,
        sentinels: &[String],
    ) -> ColumnType {
        let sample: Vec<&str> = values
            .map(str::trim)
            .filter(|v| !is_sentinel(v, sentinels))
            .take(self.sample_size)
            .collect();

        let Some(first) = sample.first() else {
            return ColumnType::String;
        };

        if parse_datetime(first).is_some() {
            return ColumnType::Datetime;
        }
        // The i64 check keeps inference in line with the validator's
        // coercion: digit strings beyond i64 range are numbers, not
        // integers.
        if sample
            .iter()
            .all(|v| INTEGER_PATTERN.is_match(v) && v.parse::<i64>().is_ok())
        {
            return ColumnType::Integer;
        }
        if sample.iter().all(|v| DECIMAL_PATTERN.is_match(v)) {
            return ColumnType::Number;
        }
        ColumnType::String
    }
}

impl Default for TypeInferencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a raw value is a configured missing-value token.
pub fn is_sentinel(value: &str, sentinels: &[String]) -> bool {
    sentinels.iter().any(|s| s == value.trim())
}

/// Parse an ISO-8601 date/time literal. Shared by inference and the
/// default validator so both agree on what a datetime is.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentinels(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_declared_type_wins_over_samples() {
        let inferencer = TypeInferencer::new();
        let inferred = inferencer.infer(
            Some("float"),
            ["2024-01-01", "2024-01-02"].into_iter(),
            &[],
        );
        assert_eq!(inferred, ColumnType::Number);
    }

    #[test]
    fn test_declared_type_mapping() {
        assert_eq!(
            TypeInferencer::from_declared("timestamp with time zone"),
            ColumnType::Datetime
        );
        assert_eq!(TypeInferencer::from_declared("Date"), ColumnType::Datetime);
        assert_eq!(TypeInferencer::from_declared("real"), ColumnType::Number);
        assert_eq!(TypeInferencer::from_declared("DOUBLE"), ColumnType::Number);
        assert_eq!(TypeInferencer::from_declared("int"), ColumnType::Integer);
        assert_eq!(TypeInferencer::from_declared("varchar"), ColumnType::String);
    }

    #[test]
    fn test_blank_declared_type_falls_back_to_samples() {
        let inferencer = TypeInferencer::new();
        let inferred = inferencer.infer(Some("  "), ["1", "2"].into_iter(), &[]);
        assert_eq!(inferred, ColumnType::Integer);
    }

    #[test]
    fn test_sampled_datetime() {
        let inferencer = TypeInferencer::new();
        let samples = ["2024-01-01T00:00:00", "2024-01-02T00:00:00"];
        assert_eq!(
            inferencer.from_samples(samples.into_iter(), &[]),
            ColumnType::Datetime
        );
    }

    #[test]
    fn test_sampled_integers() {
        let inferencer = TypeInferencer::new();
        assert_eq!(
            inferencer.from_samples(["1", "2", "3"].into_iter(), &[]),
            ColumnType::Integer
        );
    }

    #[test]
    fn test_sentinels_skipped_before_inference() {
        let inferencer = TypeInferencer::new();
        let inferred =
            inferencer.from_samples(["-999", "-999", "5.2"].into_iter(), &sentinels(&["-999"]));
        assert_eq!(inferred, ColumnType::Number);
    }

    #[test]
    fn test_all_sentinel_sample_is_string() {
        let inferencer = TypeInferencer::new();
        let inferred =
            inferencer.from_samples(["-999", "-999"].into_iter(), &sentinels(&["-999"]));
        assert_eq!(inferred, ColumnType::String);
    }

    #[test]
    fn test_empty_sample_is_string() {
        let inferencer = TypeInferencer::new();
        assert_eq!(
            inferencer.from_samples(std::iter::empty(), &[]),
            ColumnType::String
        );
    }

    #[test]
    fn test_mixed_sample_is_string() {
        let inferencer = TypeInferencer::new();
        assert_eq!(
            inferencer.from_samples(["1", "x", "3"].into_iter(), &[]),
            ColumnType::String
        );
    }

    #[test]
    fn test_integers_beyond_i64_become_number() {
        let inferencer = TypeInferencer::new();
        assert_eq!(
            inferencer.from_samples(
                ["12345678901234567890", "98765432109876543210"].into_iter(),
                &[]
            ),
            ColumnType::Number
        );
    }

    #[test]
    fn test_digits_do_not_become_datetime() {
        // Numeric-looking values only trigger datetime when genuinely
        // parseable as a date-time literal.
        let inferencer = TypeInferencer::new();
        assert_eq!(
            inferencer.from_samples(["20240101", "20240102"].into_iter(), &[]),
            ColumnType::Integer
        );
    }

    #[test]
    fn test_parse_datetime_formats() {
        assert!(parse_datetime("2024-06-01T00:00").is_some());
        assert!(parse_datetime("2024-06-01T12:30:05").is_some());
        assert!(parse_datetime("2024-06-01 12:30:05").is_some());
        assert!(parse_datetime("2024-06-01").is_some());
        assert!(parse_datetime("2024-06-01T00:00:00Z").is_some());
        assert!(parse_datetime("15.2").is_none());
        assert!(parse_datetime("1").is_none());
    }

    #[test]
    fn test_sample_size_limit() {
        let inferencer = TypeInferencer::with_sample_size(2);
        // The non-integer value sits beyond the sample window.
        let values = ["1", "2", "x"];
        assert_eq!(
            inferencer.from_samples(values.into_iter(), &[]),
            ColumnType::Integer
        );
    }
}
