//! Cell/row/sheet models, line kinds, and parse options.

use std::fmt;

////////////////////////////////////////////////////////////////////////////////
// #region CellModel

/// One output cell.
///
/// Rows leave the segmenter as `Text` only; `Integer`/`Float` appear after
/// normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCell {
    /// Text value (possibly empty padding).
    Text(String),
    /// Integral numeric value.
    Integer(i64),
    /// Non-integral numeric value.
    Float(f64),
}

impl EnumCell {
    /// Empty text cell used for row padding.
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// True for empty text (padding or separator cells).
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(val) if val.is_empty())
    }
}

impl From<&str> for EnumCell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EnumCell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for EnumCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(val) => write!(f, "{val}"),
            Self::Integer(val) => write!(f, "{val}"),
            Self::Float(val) => write!(f, "{val}"),
        }
    }
}

/// Row of raw string tokens as produced by the segmenter.
pub type TypeRawRow = Vec<String>;

/// Row of normalized cells.
pub type TypeRow = Vec<EnumCell>;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LineKinds

/// Sub-format a cleaned, non-empty line was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumLineKind {
    /// `MSerror = ...` scalar summary.
    MsError,
    /// `SEm± ...` comma-separated standard errors.
    StandardError,
    /// `Df Sum Sq Mean Sq ...` ANOVA header.
    AnovaHeader,
    /// `Signif. codes: 0 ‘***’ ...` legend.
    SignifLegend,
    /// `W = ..., p-value = ...` test statistic.
    WStatistic,
    /// Label followed by numeric-ish tokens.
    TableRow,
    /// No rule matched; kept as one cell.
    Text,
}

impl EnumLineKind {
    /// Stable snake-case name used in reports and bindings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MsError => "mserror",
            Self::StandardError => "standard_error",
            Self::AnovaHeader => "anova_header",
            Self::SignifLegend => "signif_legend",
            Self::WStatistic => "w_statistic",
            Self::TableRow => "table_row",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for EnumLineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetModels

/// Raw input for one sheet: name plus ordered text lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecSheetLines {
    /// Sheet name as found in the source workbook.
    pub sheet_name: String,
    /// Ordered raw lines, top to bottom.
    pub lines: Vec<String>,
}

/// Normalized output for one sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheet {
    /// Sheet name as found in the source workbook.
    pub sheet_name: String,
    /// Rectangular grid, final output order.
    pub rows: Vec<TypeRow>,
}

impl SpecSheet {
    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (all rows share it after normalization).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// True if the sheet has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Options for multi-sheet parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecParseOptions {
    /// Maximum worker threads; `None` uses available parallelism (capped).
    pub num_workers_max: Option<usize>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
