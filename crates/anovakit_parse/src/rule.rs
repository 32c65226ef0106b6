//! Ordered line-classification rules.
//!
//! Rules are evaluated top to bottom and the first match wins. Order encodes the
//! tie-breaks: every summary shape is checked before the generic table-row shape,
//! so e.g. an ANOVA header never classifies as a table row.

use crate::conf::{
    C_PREFIX_MSERROR, C_PREFIX_SEM, C_PREFIX_SEM_QUOTED, C_PREFIX_W_STATISTIC,
    TUP_ANOVA_HEADER_LABELS, TUP_ANOVA_HEADER_MARKERS,
};
use crate::spec::{EnumLineKind, TypeRawRow};
use crate::util::{
    extract_signif_tokens, is_signif_legend, is_table_row_shape, split_on_comma,
    split_on_whitespace,
};

/// One classification rule: a predicate, the line rewrite applied on match, and
/// the tokenizer run on the rewritten line.
#[derive(Clone, Copy)]
pub struct SpecLineRule {
    /// Kind reported when this rule matches.
    pub kind: EnumLineKind,
    /// Predicate over a cleaned, non-empty line.
    pub is_match: fn(&str) -> bool,
    /// Rewrite of the matched line; later shape checks see this form.
    pub prepare: fn(&str) -> &str,
    /// Tokenizer producing the row cells.
    pub split: fn(&str) -> TypeRawRow,
}

/// Classification rules in priority order.
pub static TUP_LINE_RULES: [SpecLineRule; 6] = [
    SpecLineRule {
        kind: EnumLineKind::MsError,
        is_match: _is_mserror,
        prepare: _keep_line,
        split: split_on_whitespace,
    },
    SpecLineRule {
        kind: EnumLineKind::StandardError,
        is_match: _is_standard_error,
        prepare: _strip_quotes,
        split: split_on_comma,
    },
    SpecLineRule {
        kind: EnumLineKind::AnovaHeader,
        is_match: _is_anova_header,
        prepare: _keep_line,
        split: _split_anova_header,
    },
    SpecLineRule {
        kind: EnumLineKind::SignifLegend,
        is_match: is_signif_legend,
        prepare: _keep_line,
        split: extract_signif_tokens,
    },
    SpecLineRule {
        kind: EnumLineKind::WStatistic,
        is_match: _is_w_statistic,
        prepare: _keep_line,
        split: split_on_comma,
    },
    SpecLineRule {
        kind: EnumLineKind::TableRow,
        is_match: is_table_row_shape,
        prepare: _keep_line,
        split: split_on_whitespace,
    },
];

/// First rule matching a cleaned, non-empty line.
pub fn match_line_rule(line: &str) -> Option<&'static SpecLineRule> {
    TUP_LINE_RULES.iter().find(|rule| (rule.is_match)(line))
}

/// Classify a cleaned, non-empty line and tokenize it.
///
/// Lines matching no rule come back as [`EnumLineKind::Text`] with the whole line
/// as a single token.
pub fn classify_line(line: &str) -> (EnumLineKind, TypeRawRow) {
    match match_line_rule(line) {
        Some(rule) => (rule.kind, (rule.split)((rule.prepare)(line))),
        None => (EnumLineKind::Text, vec![line.to_string()]),
    }
}

fn _keep_line(line: &str) -> &str {
    line
}

fn _is_mserror(line: &str) -> bool {
    line.trim_start().starts_with(C_PREFIX_MSERROR)
}

fn _is_standard_error(line: &str) -> bool {
    let c_line = line.trim_start();
    c_line.starts_with(C_PREFIX_SEM_QUOTED) || c_line.starts_with(C_PREFIX_SEM)
}

fn _strip_quotes(line: &str) -> &str {
    line.trim_matches('"').trim()
}

fn _is_anova_header(line: &str) -> bool {
    TUP_ANOVA_HEADER_MARKERS
        .iter()
        .all(|marker| line.contains(marker))
}

fn _split_anova_header(line: &str) -> TypeRawRow {
    let mut c_line = line.to_string();
    for (label, joined) in TUP_ANOVA_HEADER_LABELS {
        c_line = c_line.replace(label, joined);
    }
    c_line
        .split_whitespace()
        .map(|token| token.replace('_', " "))
        .collect()
}

fn _is_w_statistic(line: &str) -> bool {
    line.trim_start().starts_with(C_PREFIX_W_STATISTIC)
}
