//! Whole-workbook conversion report.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use anovakit_parse::ReportParse;

use crate::spec::SpecXlsxReport;

/// Outcome of one `convert_workbook` call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportConvert {
    /// Source workbook.
    pub file_in: PathBuf,
    /// Destination workbook.
    pub file_out: PathBuf,
    /// Source sheets written (at least one row).
    pub sheets_written: Vec<String>,
    /// Source sheets skipped because they produced no rows.
    pub sheets_skipped: Vec<String>,
    /// Per-sheet parse reports, source order.
    pub reports_parse: Vec<ReportParse>,
    /// Per-sheet writer reports, write order.
    pub reports_xlsx: Vec<SpecXlsxReport>,
    /// Run-level warnings (per-sheet warnings stay on their reports).
    pub warnings: Vec<String>,
}

impl ReportConvert {
    /// Total rows written across all sheets.
    pub fn cnt_rows(&self) -> u64 {
        self.reports_parse.iter().map(|report| report.cnt_rows).sum()
    }

    /// Warnings from this report and every nested report.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
            + self
                .reports_parse
                .iter()
                .map(ReportParse::warning_count)
                .sum::<usize>()
            + self
                .reports_xlsx
                .iter()
                .map(|report| report.warnings.len())
                .sum::<usize>()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert(
            "cnt_sheets_read".to_string(),
            self.reports_parse.len() as u64,
        );
        dict_counts.insert(
            "cnt_sheets_written".to_string(),
            self.sheets_written.len() as u64,
        );
        dict_counts.insert(
            "cnt_sheets_skipped".to_string(),
            self.sheets_skipped.len() as u64,
        );
        dict_counts.insert("cnt_rows".to_string(), self.cnt_rows());
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} in={} out={} sheets_read={} sheets_written={} sheets_skipped={} rows={} warnings={}",
            self.file_in.display(),
            self.file_out.display(),
            self.reports_parse.len(),
            self.sheets_written.len(),
            self.sheets_skipped.len(),
            self.cnt_rows(),
            self.warning_count()
        )
    }
}

impl fmt::Display for ReportConvert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[CONVERT]"))
    }
}
