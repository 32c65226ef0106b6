//! `anovakit_parse` v1:
//! Line classifier, table segmenter, and cell normalizer for printed ANOVA output.
//!
//! Modules:
//! - `conf`      : line-shape patterns and defaults
//! - `spec`      : cell/sheet models, line kinds, options
//! - `util`      : pure helper functions
//! - `rule`      : ordered classification rule table
//! - `segment`   : per-sheet scan state machine
//! - `normalize` : padding and numeric coercion
//! - `report`    : per-sheet parse report
//! - `parse`     : sheet-level entry points
pub mod conf;
pub mod normalize;
pub mod parse;
pub mod report;
pub mod rule;
pub mod segment;
pub mod spec;
pub mod util;

pub use normalize::{coerce_cell, coerce_text, normalize_rows};
pub use parse::{parse_lines, parse_sheet, parse_sheets};
pub use report::{ReportParse, ReportParseBuilder};
pub use rule::{SpecLineRule, TUP_LINE_RULES, classify_line, match_line_rule};
pub use segment::TableSegmenter;
pub use spec::{
    EnumCell, EnumLineKind, SpecParseOptions, SpecSheet, SpecSheetLines, TypeRawRow, TypeRow,
};
