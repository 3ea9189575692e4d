//! Metadata/data block splitting for the two iCSV/NEAD header dialects.

use once_cell::sync::Lazy;
use regex::Regex;

/// Freeform `METADATA` marker, optionally with a trailing colon.
static FREEFORM_META_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*METADATA\s*:?\s*$").unwrap());

/// Freeform `METADATA: key: value` marker with inline content.
static FREEFORM_META_INLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*METADATA\s*:\s*(\S.*)$").unwrap());

/// Freeform `Data` marker closing the metadata block.
static FREEFORM_DATA_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*DATA\s*:?\s*$").unwrap());

/// Delimiters probed when sniffing a data header heuristically.
const SNIFF_DELIMITERS: &[char] = &[',', ';', '\t', '|', ':'];

/// Which header convention a file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderDialect {
    /// Commented `[METADATA]` / `[FIELDS]` / `[DATA]` section markers.
    SectionMarker,
    /// Legacy `METADATA:` ... `Data:` markers, or no markers at all.
    Freeform,
}

impl HeaderDialect {
    /// Short name used in source metadata and verbose output.
    pub fn label(&self) -> &'static str {
        match self {
            HeaderDialect::SectionMarker => "section-marker",
            HeaderDialect::Freeform => "freeform",
        }
    }
}

/// The raw line groups a file splits into.
///
/// Metadata and field lines are stripped of their comment markers; data
/// lines are verbatim. Blank lines are never emitted.
#[derive(Debug, Clone)]
pub struct SplitDocument {
    pub dialect: HeaderDialect,
    pub metadata_lines: Vec<String>,
    pub field_lines: Vec<String>,
    pub data_lines: Vec<String>,
}

/// Configuration for block splitting.
#[derive(Debug, Clone)]
pub struct SplitterConfig {
    /// How many leading lines to inspect for markers and heuristics.
    pub sniff_lines: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self { sniff_lines: 500 }
    }
}

/// Separates the metadata header from the data block of a hybrid file.
///
/// Both supported dialects are handled behind one entry point; the dialect
/// is picked by sniffing the first [`SplitterConfig::sniff_lines`] lines.
pub struct MetadataBlockSplitter {
    config: SplitterConfig,
}

impl MetadataBlockSplitter {
    /// Create a splitter with default configuration.
    pub fn new() -> Self {
        Self {
            config: SplitterConfig::default(),
        }
    }

    /// Create a splitter with custom configuration.
    pub fn with_config(config: SplitterConfig) -> Self {
        Self { config }
    }

    /// Split raw file text into metadata, field-attribute and data lines.
    pub fn split(&self, text: &str) -> SplitDocument {
        let lines: Vec<&str> = text.lines().collect();
        match self.sniff_dialect(&lines) {
            HeaderDialect::SectionMarker => self.split_sections(&lines),
            HeaderDialect::Freeform => self.split_freeform(&lines),
        }
    }

    /// Decide which dialect the file uses by scanning the sniff window.
    fn sniff_dialect(&self, lines: &[&str]) -> HeaderDialect {
        for line in lines.iter().take(self.config.sniff_lines) {
            if strip_comment(line) == "[METADATA]" {
                return HeaderDialect::SectionMarker;
            }
        }
        HeaderDialect::Freeform
    }

    /// Section-marker dialect: commented `[METADATA]`/`[FIELDS]`/`[DATA]`.
    fn split_sections(&self, lines: &[&str]) -> SplitDocument {
        #[derive(PartialEq)]
        enum Section {
            None,
            Metadata,
            Fields,
        }

        let mut section = Section::None;
        let mut metadata_lines = Vec::new();
        let mut field_lines = Vec::new();
        let mut data_lines = Vec::new();
        let mut in_data = false;

        for line in lines {
            if in_data {
                let trimmed = line.trim();
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    data_lines.push(trimmed.to_string());
                }
                continue;
            }

            let content = strip_comment(line);
            match content.as_str() {
                "[METADATA]" => {
                    section = Section::Metadata;
                    continue;
                }
                "[FIELDS]" => {
                    section = Section::Fields;
                    continue;
                }
                "[DATA]" => {
                    in_data = true;
                    continue;
                }
                _ => {}
            }

            // Only commented lines inside a recognized section are header
            // content; anything else before [DATA] is noise.
            if !line.trim_start().starts_with('#') || content.is_empty() {
                continue;
            }
            match section {
                Section::Metadata => metadata_lines.push(content),
                Section::Fields => field_lines.push(content),
                Section::None => {}
            }
        }

        SplitDocument {
            dialect: HeaderDialect::SectionMarker,
            metadata_lines,
            field_lines,
            data_lines,
        }
    }

    /// Freeform dialect: `METADATA:`/`Data:` markers or pure heuristics.
    fn split_freeform(&self, lines: &[&str]) -> SplitDocument {
        let window = self.config.sniff_lines.min(lines.len());

        let mut meta_idx = None;
        let mut inline_content = None;
        for (i, line) in lines.iter().take(window).enumerate() {
            if FREEFORM_META_MARKER.is_match(line) {
                meta_idx = Some(i);
                break;
            }
            if let Some(caps) = FREEFORM_META_INLINE.captures(line) {
                meta_idx = Some(i);
                inline_content = Some(caps[1].trim().to_string());
                break;
            }
        }

        match meta_idx {
            Some(idx) => self.split_freeform_marked(lines, idx, inline_content),
            None => self.split_freeform_heuristic(lines),
        }
    }

    /// Markers found: metadata runs from the marker to the `Data` marker
    /// (or the end of the sniff window), data starts at the first plausible
    /// row after the `Data` marker.
    fn split_freeform_marked(
        &self,
        lines: &[&str],
        meta_idx: usize,
        inline_content: Option<String>,
    ) -> SplitDocument {
        let n = lines.len();
        let window = self.config.sniff_lines.min(n);

        let data_idx = lines
            .iter()
            .enumerate()
            .take(window)
            .skip(meta_idx + 1)
            .find(|(_, line)| FREEFORM_DATA_MARKER.is_match(line))
            .map(|(i, _)| i);

        let block_end = data_idx.unwrap_or(window);
        let mut metadata_lines: Vec<String> = Vec::new();
        if let Some(content) = inline_content {
            metadata_lines.push(content);
        }
        for line in &lines[meta_idx + 1..block_end] {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                metadata_lines.push(trimmed.to_string());
            }
        }

        // With no explicit data marker, data starts right after the block.
        let data_start = match data_idx {
            Some(idx) => find_data_start(lines, idx + 1).unwrap_or(idx + 1),
            None => block_end,
        };

        SplitDocument {
            dialect: HeaderDialect::Freeform,
            metadata_lines,
            field_lines: Vec::new(),
            data_lines: collect_data_lines(&lines[data_start.min(n)..]),
        }
    }

    /// No markers at all: single `key: value` lines are metadata, the
    /// first line whose delimiter count repeats below starts the data.
    fn split_freeform_heuristic(&self, lines: &[&str]) -> SplitDocument {
        let window = self.config.sniff_lines.min(lines.len());
        let mut metadata_lines = Vec::new();
        let mut last_meta_idx = None;
        let mut data_start = None;

        for (i, line) in lines.iter().take(window).enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.contains(':') && trimmed.matches(',').count() <= 1 {
                metadata_lines.push(trimmed.to_string());
                last_meta_idx = Some(i);
                continue;
            }
            if let Some(delim) = [',', ';', '\t'].iter().find(|d| trimmed.contains(**d)) {
                let header_count = trimmed.matches(*delim).count();
                let repeats = lines[i + 1..(i + 6).min(lines.len())]
                    .iter()
                    .filter(|next| next.matches(*delim).count() >= header_count)
                    .count();
                if repeats >= 1 {
                    data_start = Some(i);
                    break;
                }
            }
        }

        let start = data_start.unwrap_or_else(|| last_meta_idx.map_or(0, |i| i + 1));

        SplitDocument {
            dialect: HeaderDialect::Freeform,
            metadata_lines,
            field_lines: Vec::new(),
            data_lines: collect_data_lines(&lines[start.min(lines.len())..]),
        }
    }
}

impl Default for MetadataBlockSplitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip leading comment markers and surrounding whitespace.
fn strip_comment(line: &str) -> String {
    line.trim_start()
        .trim_start_matches('#')
        .trim()
        .to_string()
}

/// First line at or after `from` that plausibly starts the data block:
/// it contains a delimiter, or looks like a bare header followed by a
/// numeric row.
fn find_data_start(lines: &[&str], from: usize) -> Option<usize> {
    for (k, line) in lines.iter().enumerate().skip(from) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if SNIFF_DELIMITERS.iter().any(|d| trimmed.contains(*d)) {
            return Some(k);
        }
        let next = lines.get(k + 1).map(|l| l.trim()).unwrap_or("");
        if trimmed.chars().any(|c| c.is_ascii_alphabetic())
            && (next.chars().any(|c| c.is_ascii_digit()) || next.contains("NA"))
        {
            return Some(k);
        }
    }
    None
}

/// Keep non-blank lines verbatim (trimmed) as data rows.
fn collect_data_lines(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_section_dialect() {
        let text = "\
# [METADATA]
# field_delimiter = ,
# srid = EPSG:4326
# [FIELDS]
# fields = a,b
# [DATA]
1,2
3,4
";
        let doc = MetadataBlockSplitter::new().split(text);
        assert_eq!(doc.dialect, HeaderDialect::SectionMarker);
        assert_eq!(
            doc.metadata_lines,
            vec!["field_delimiter = ,", "srid = EPSG:4326"]
        );
        assert_eq!(doc.field_lines, vec!["fields = a,b"]);
        assert_eq!(doc.data_lines, vec!["1,2", "3,4"]);
    }

    #[test]
    fn test_section_dialect_skips_blank_and_stray_lines() {
        let text = "\
junk before header
# [METADATA]
# station = DW1

not a comment
# [DATA]

1,2
# trailing comment
3,4
";
        let doc = MetadataBlockSplitter::new().split(text);
        assert_eq!(doc.metadata_lines, vec!["station = DW1"]);
        assert_eq!(doc.data_lines, vec!["1,2", "3,4"]);
    }

    #[test]
    fn test_split_freeform_with_markers() {
        let text = "\
METADATA:
station: DW1
field_delimiter: ,
Data:
a,b
1,2
";
        let doc = MetadataBlockSplitter::new().split(text);
        assert_eq!(doc.dialect, HeaderDialect::Freeform);
        assert_eq!(
            doc.metadata_lines,
            vec!["station: DW1", "field_delimiter: ,"]
        );
        assert!(doc.field_lines.is_empty());
        assert_eq!(doc.data_lines, vec!["a,b", "1,2"]);
    }

    #[test]
    fn test_freeform_inline_metadata_content() {
        let text = "METADATA: station: DW1\nunit: m\nData:\nx,y\n1,2\n";
        let doc = MetadataBlockSplitter::new().split(text);
        assert_eq!(doc.metadata_lines[0], "station: DW1");
        assert_eq!(doc.metadata_lines[1], "unit: m");
        assert_eq!(doc.data_lines, vec!["x,y", "1,2"]);
    }

    #[test]
    fn test_freeform_no_data_marker_falls_back_to_block_end() {
        let text = "METADATA:\nstation: DW1\na,b\n1,2\n";
        let doc = MetadataBlockSplitter::with_config(SplitterConfig { sniff_lines: 2 }).split(text);
        assert_eq!(doc.metadata_lines, vec!["station: DW1"]);
        assert_eq!(doc.data_lines, vec!["a,b", "1,2"]);
    }

    #[test]
    fn test_freeform_heuristic_detection() {
        let text = "\
station: DW1
elevation: 2540
a,b,c
1,2,3
4,5,6
";
        let doc = MetadataBlockSplitter::new().split(text);
        assert_eq!(doc.dialect, HeaderDialect::Freeform);
        assert_eq!(doc.metadata_lines, vec!["station: DW1", "elevation: 2540"]);
        assert_eq!(doc.data_lines, vec!["a,b,c", "1,2,3", "4,5,6"]);
    }

    #[test]
    fn test_freeform_heuristic_without_data_block() {
        let text = "station: DW1\nelevation: 2540\n";
        let doc = MetadataBlockSplitter::new().split(text);
        assert_eq!(doc.metadata_lines.len(), 2);
        assert!(doc.data_lines.is_empty());
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("# [METADATA]"), "[METADATA]");
        assert_eq!(strip_comment("## x = 1"), "x = 1");
        assert_eq!(strip_comment("  #[DATA]"), "[DATA]");
    }
}
