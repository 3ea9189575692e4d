//! Source metadata and the parsed data block.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One data row: raw string cells, one per column, never coerced here.
pub type DataRow = Vec<String>;

/// Metadata about the analyzed source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Header dialect the file was parsed with.
    pub dialect: String,
    /// Number of data rows.
    pub row_count: usize,
    /// Number of declared columns (0 when unknown).
    pub column_count: usize,
    /// When the analysis was performed.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        dialect: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            dialect,
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }
}

/// The data block of a file, split into raw rows.
#[derive(Debug, Clone)]
pub struct DataBlock {
    /// Row data as strings (row-major order).
    pub rows: Vec<DataRow>,
    /// The delimiter the rows were split with.
    pub delimiter: char,
}

impl DataBlock {
    /// Parse data lines with the declared delimiter.
    ///
    /// The csv reader handles quoting; rows are kept flexible since a
    /// wrong cell count is a validation finding, not a parse error.
    pub fn parse(lines: &[String], delimiter: char) -> Result<Self> {
        let delim_byte = if delimiter.is_ascii() {
            delimiter as u8
        } else {
            b','
        };

        let joined = lines.join("\n");
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delim_byte)
            .has_headers(false)
            .flexible(true)
            .from_reader(joined.as_bytes());

        let mut rows = Vec::with_capacity(lines.len());
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|s| s.trim().to_string()).collect());
        }

        Ok(Self { rows, delimiter })
    }

    /// Create a data block from already-split rows.
    pub fn from_rows(rows: Vec<DataRow>, delimiter: char) -> Self {
        Self { rows, delimiter }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All values of one column, empty string where a row is short.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pipe_delimited() {
        let lines = vec![
            "2024-06-01T00:00|15.2|0.55".to_string(),
            "2024-06-01T01:00|14.8|0.57".to_string(),
        ];
        let block = DataBlock::parse(&lines, '|').unwrap();
        assert_eq!(block.row_count(), 2);
        assert_eq!(block.rows[0], vec!["2024-06-01T00:00", "15.2", "0.55"]);
    }

    #[test]
    fn test_parse_keeps_short_rows() {
        let lines = vec!["1,2,3".to_string(), "4,5".to_string()];
        let block = DataBlock::parse(&lines, ',').unwrap();
        assert_eq!(block.rows[1].len(), 2);
    }

    #[test]
    fn test_column_values_pads_missing_cells() {
        let block = DataBlock::from_rows(
            vec![vec!["1".to_string(), "2".to_string()], vec!["3".to_string()]],
            ',',
        );
        let col: Vec<&str> = block.column_values(1).collect();
        assert_eq!(col, vec!["2", ""]);
    }

    #[test]
    fn test_parse_respects_quoting() {
        let lines = vec!["\"a,b\",2".to_string(), "c,3".to_string()];
        let block = DataBlock::parse(&lines, ',').unwrap();
        assert_eq!(block.rows[0], vec!["a,b", "2"]);
    }
}
