//! Read/convert options, sheet slice models, and top-level error type.

use std::fmt;
use std::path::PathBuf;

use anovakit_parse::SpecParseOptions;

use crate::conf::N_COL_IDX_TEXT_DEFAULT;

////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Options for reading printed text out of a source workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxReadOptions {
    /// Zero-based column holding one printed line per cell.
    pub col_idx_text: usize,
    /// Turn missing cells into blank lines instead of dropping them.
    pub if_keep_missing_cells: bool,
    /// Restrict to these sheets (workbook order is kept); `None` reads all.
    pub sheet_names: Option<Vec<String>>,
}

impl Default for SpecXlsxReadOptions {
    fn default() -> Self {
        Self {
            col_idx_text: N_COL_IDX_TEXT_DEFAULT,
            if_keep_missing_cells: false,
            sheet_names: None,
        }
    }
}

/// Options for a whole-workbook conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecConvertOptions {
    /// Source reading options.
    pub read_options: SpecXlsxReadOptions,
    /// Parse fan-out options.
    pub parse_options: SpecParseOptions,
    /// Create the destination's parent directory when missing.
    pub if_create_parent_dir: bool,
}

impl Default for SpecConvertOptions {
    fn default() -> Self {
        Self {
            read_options: SpecXlsxReadOptions::default(),
            parse_options: SpecParseOptions::default(),
            if_create_parent_dir: true,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetSlices

/// Concrete sheet part emitted to workbook (after Excel-limit slicing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetSlice {
    /// Actual unique sheet name in workbook.
    pub sheet_name: String,
    /// Inclusive source row start.
    pub row_start_inclusive: usize,
    /// Exclusive source row end.
    pub row_end_exclusive: usize,
    /// Inclusive source column start.
    pub col_start_inclusive: usize,
    /// Exclusive source column end.
    pub col_end_exclusive: usize,
}

/// Per-sheet write report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Source sheet name before sanitizing.
    pub sheet_name_source: String,
    /// Sheet slices produced by the write call.
    pub sheets: Vec<SpecSheetSlice>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Top-level conversion failures.
#[derive(Debug)]
pub enum XlsxConvertError {
    /// Source workbook could not be opened or recognized.
    SourceUnreadable {
        /// Source workbook path.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },
    /// One sheet of an opened workbook could not be read.
    SheetUnreadable {
        /// Sheet that failed.
        sheet_name: String,
        /// Underlying reader error text.
        message: String,
    },
    /// Destination workbook could not be created or written.
    DestinationUnwritable {
        /// Destination workbook path.
        path: PathBuf,
        /// Underlying writer/IO error text.
        message: String,
    },
    /// Invalid option combination or value.
    InvalidOptions(String),
}

impl fmt::Display for XlsxConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnreadable { path, message } => {
                write!(f, "Failed to read workbook {}: {message}", path.display())
            }
            Self::SheetUnreadable {
                sheet_name,
                message,
            } => write!(f, "Failed to read sheet {sheet_name:?}: {message}"),
            Self::DestinationUnwritable { path, message } => {
                write!(f, "Failed to write workbook {}: {message}", path.display())
            }
            Self::InvalidOptions(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for XlsxConvertError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////
