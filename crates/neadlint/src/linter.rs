//! Main Linter struct and public pipeline API.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::consistency::ConsistencyChecker;
use crate::error::{NeadError, Result};
use crate::inference::TypeInferencer;
use crate::input::{
    field_delimiter, DataBlock, DataRow, FieldAttributeTable, HeaderDialect,
    MetadataBlockSplitter, MetadataMap, MetadataParser, SourceMetadata, SplitterConfig,
};
use crate::report::ReportComposer;
use crate::schema::{ConventionTable, SchemaBuilder, SchemaDescriptor};
use crate::validation::{Finding, Severity, TypedValidator, Validator};

/// Configuration for the validation pipeline.
///
/// Required-key lists, sentinel tokens and the name-based convention
/// table are explicit policy here rather than process-wide constants, so
/// alternate conventions can be substituted per run (and per test).
#[derive(Debug, Clone)]
pub struct LinterConfig {
    /// Lines inspected when sniffing the header dialect.
    pub sniff_lines: usize,
    /// Non-sentinel values sampled per column for type inference.
    pub sample_size: usize,
    /// Metadata keys that must be present and non-empty.
    pub required_keys: Vec<String>,
    /// Sentinels used when the header declares no `nodata` value.
    pub default_missing_values: Vec<String>,
    /// Name-based constraint conventions.
    pub conventions: ConventionTable,
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self {
            sniff_lines: 500,
            sample_size: 50,
            required_keys: ["field_delimiter", "geometry", "srid"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            default_missing_values: vec![String::new(), "NA".to_string()],
            conventions: ConventionTable::default(),
        }
    }
}

/// Everything the pipeline produced for one file.
#[derive(Debug)]
pub struct FileOutcome {
    /// Provenance of the analyzed file.
    pub source: SourceMetadata,
    /// Parsed metadata key/value pairs.
    pub metadata: MetadataMap,
    /// Parsed per-field attribute table.
    pub attributes: FieldAttributeTable,
    /// Raw data rows, split but never coerced.
    pub rows: Vec<DataRow>,
    /// Header-level findings from the consistency checker.
    pub metadata_findings: Vec<Finding>,
    /// The schema, absent when fatal header findings blocked it.
    pub schema: Option<SchemaDescriptor>,
    /// Findings from the row validator.
    pub data_findings: Vec<Finding>,
    /// The composed report text.
    pub report: String,
}

impl FileOutcome {
    /// Whether the file passed with no error-severity findings.
    pub fn passed(&self) -> bool {
        !self
            .metadata_findings
            .iter()
            .chain(self.data_findings.iter())
            .any(|f| f.severity == Severity::Error)
    }
}

/// The validation pipeline: split, parse, check, build, validate, report.
pub struct Linter {
    config: LinterConfig,
    splitter: MetadataBlockSplitter,
    parser: MetadataParser,
    checker: ConsistencyChecker,
    builder: SchemaBuilder,
    validator: Box<dyn Validator>,
    composer: ReportComposer,
}

impl Linter {
    /// Create a linter with default configuration.
    pub fn new() -> Self {
        Self::with_config(LinterConfig::default())
    }

    /// Create a linter with custom configuration.
    pub fn with_config(config: LinterConfig) -> Self {
        let splitter = MetadataBlockSplitter::with_config(SplitterConfig {
            sniff_lines: config.sniff_lines,
        });
        let checker = ConsistencyChecker::with_required_keys(config.required_keys.clone());
        let builder = SchemaBuilder::with_policy(
            TypeInferencer::with_sample_size(config.sample_size),
            config.conventions.clone(),
            config.default_missing_values.clone(),
        );

        Self {
            config,
            splitter,
            parser: MetadataParser::new(),
            checker,
            builder,
            validator: Box::new(TypedValidator::new()),
            composer: ReportComposer::new(),
        }
    }

    /// Swap in a different row validator.
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Run the full pipeline on one file.
    pub fn check_file(&self, path: impl AsRef<Path>) -> Result<FileOutcome> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| NeadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());
        let size_bytes = contents.len() as u64;

        let text = String::from_utf8_lossy(&contents);
        let mut outcome = self.check_text(&text)?;
        outcome.source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            outcome.source.dialect.clone(),
            outcome.source.row_count,
            outcome.source.column_count,
        );
        Ok(outcome)
    }

    /// Run the pipeline on raw text (path-independent part).
    pub fn check_text(&self, text: &str) -> Result<FileOutcome> {
        if text.trim().is_empty() {
            return Err(NeadError::EmptyData("no content to analyze".to_string()));
        }

        let doc = self.splitter.split(text);
        let dialect = doc.dialect;
        let (metadata, mut attributes) = self.parser.parse(&doc);

        let delimiter = field_delimiter(&metadata);
        let mut data = DataBlock::parse(&doc.data_lines, delimiter)?;
        if dialect == HeaderDialect::Freeform {
            reconcile_freeform_header(&mut attributes, &mut data);
        }

        let metadata_findings = self.checker.check(&metadata, &attributes);

        let (schema, data_findings) = if ConsistencyChecker::is_fatal(&metadata_findings) {
            (None, Vec::new())
        } else {
            let schema = self.builder.build(&metadata, &attributes, &data);
            let findings = self.validator.validate(&data.rows, &schema);
            (Some(schema), findings)
        };

        let report = match &schema {
            Some(schema) => {
                self.composer
                    .compose(&metadata_findings, Some(schema), Some(&data_findings))?
            }
            None => self.composer.compose(&metadata_findings, None, None)?,
        };

        let column_count = attributes.get("fields").map_or(0, |f| f.len());
        let source = SourceMetadata::new(
            PathBuf::from("<memory>"),
            String::new(),
            text.len() as u64,
            dialect.label().to_string(),
            data.row_count(),
            column_count,
        );

        Ok(FileOutcome {
            source,
            metadata,
            attributes,
            rows: data.rows,
            metadata_findings,
            schema,
            data_findings,
            report,
        })
    }

    /// Run the pipeline over a batch.
    ///
    /// Each file's outcome is independent: a fatal finding or an
    /// unreadable file never aborts the remaining files.
    pub fn check_batch(&self, paths: &[PathBuf]) -> Vec<(PathBuf, Result<FileOutcome>)> {
        paths
            .iter()
            .map(|path| (path.clone(), self.check_file(path)))
            .collect()
    }

    /// The active configuration.
    pub fn config(&self) -> &LinterConfig {
        &self.config
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

/// Freeform files carry their column names in the data block or in a
/// `fields` metadata value; align the two so the schema builder sees the
/// same shape as for section-marker files.
fn reconcile_freeform_header(attributes: &mut FieldAttributeTable, data: &mut DataBlock) {
    match attributes.get("fields") {
        Some(fields) => {
            // Drop an embedded header row that merely repeats the names.
            let echoes_names = data
                .rows
                .first()
                .is_some_and(|row| row.iter().map(String::as_str).eq(fields.iter().map(String::as_str)));
            if echoes_names {
                data.rows.remove(0);
            }
        }
        None => {
            if !data.rows.is_empty() {
                let header = data.rows.remove(0);
                attributes.insert("fields".to_string(), header);
            }
        }
    }
}
