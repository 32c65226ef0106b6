//! Parse report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use crate::spec::EnumLineKind;

/// Counters and diagnostics for one parsed sheet.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportParse {
    /// Sheet name the counters belong to.
    pub sheet_name: String,
    /// Raw lines read.
    pub cnt_lines: u64,
    /// Lines dropped as `$name` prompt artifacts.
    pub cnt_skipped: u64,
    /// Lines empty after cleaning.
    pub cnt_blank: u64,
    /// Table segments flushed (each followed by one separator row).
    pub cnt_segments: u64,
    /// Rows in the final grid (separators included).
    pub cnt_rows: u64,
    /// Final grid width.
    pub width: u64,
    /// Text cells coerced to numbers.
    pub cnt_coerced: u64,
    /// Classified lines per kind.
    pub cnt_by_kind: BTreeMap<EnumLineKind, u64>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ReportParse {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Count of lines classified as `kind`.
    pub fn kind_count(&self, kind: EnumLineKind) -> u64 {
        self.cnt_by_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_lines".to_string(), self.cnt_lines);
        dict_counts.insert("cnt_skipped".to_string(), self.cnt_skipped);
        dict_counts.insert("cnt_blank".to_string(), self.cnt_blank);
        dict_counts.insert("cnt_segments".to_string(), self.cnt_segments);
        dict_counts.insert("cnt_rows".to_string(), self.cnt_rows);
        dict_counts.insert("width".to_string(), self.width);
        dict_counts.insert("cnt_coerced".to_string(), self.cnt_coerced);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        for (kind, cnt) in &self.cnt_by_kind {
            dict_counts.insert(format!("cnt_kind_{}", kind.name()), *cnt);
        }
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} sheet={:?} lines={} skipped={} blank={} segments={} rows={} width={} coerced={} warnings={}",
            self.sheet_name,
            self.cnt_lines,
            self.cnt_skipped,
            self.cnt_blank,
            self.cnt_segments,
            self.cnt_rows,
            self.width,
            self.cnt_coerced,
            self.warning_count()
        )
    }
}

impl fmt::Display for ReportParse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[PARSE]"))
    }
}

/// Mutable accumulator for parse statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportParseBuilder {
    /// See [`ReportParse::cnt_lines`].
    pub cnt_lines: u64,
    /// See [`ReportParse::cnt_skipped`].
    pub cnt_skipped: u64,
    /// See [`ReportParse::cnt_blank`].
    pub cnt_blank: u64,
    /// See [`ReportParse::cnt_segments`].
    pub cnt_segments: u64,
    /// See [`ReportParse::cnt_by_kind`].
    pub cnt_by_kind: BTreeMap<EnumLineKind, u64>,
}

impl ReportParseBuilder {
    /// Increment raw line count by one.
    pub fn add_line(&mut self) {
        self.cnt_lines += 1;
    }

    /// Increment skipped count by one.
    pub fn add_skipped(&mut self) {
        self.cnt_skipped += 1;
    }

    /// Increment blank count by one.
    pub fn add_blank(&mut self) {
        self.cnt_blank += 1;
    }

    /// Increment flushed segment count by one.
    pub fn add_segment(&mut self) {
        self.cnt_segments += 1;
    }

    /// Record one classified line.
    pub fn add_kind(&mut self, kind: EnumLineKind) {
        *self.cnt_by_kind.entry(kind).or_insert(0) += 1;
    }

    /// Finalize builder into immutable report.
    ///
    /// Grid-level counters (`cnt_rows`, `width`, `cnt_coerced`) are filled by the
    /// normalizer stage.
    pub fn build(self, sheet_name: &str) -> ReportParse {
        ReportParse {
            sheet_name: sheet_name.to_string(),
            cnt_lines: self.cnt_lines,
            cnt_skipped: self.cnt_skipped,
            cnt_blank: self.cnt_blank,
            cnt_segments: self.cnt_segments,
            cnt_rows: 0,
            width: 0,
            cnt_coerced: 0,
            cnt_by_kind: self.cnt_by_kind,
            warnings: Vec::new(),
        }
    }
}
