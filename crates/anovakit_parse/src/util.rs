//! Stateless helpers shared by the rule table, segmenter, and normalizer.

use std::sync::LazyLock;

use regex::Regex;

use crate::conf::{
    C_PREFIX_PROMPT_ARTIFACT, N_WORKERS_DEFAULT_MAX, PAT_FOOTNOTE_MARKER, PAT_NUMERIC_LITERAL,
    PAT_SIGNIF_LEGEND, PAT_SIGNIF_TOKEN, PAT_TABLE_ROW,
};

////////////////////////////////////////////////////////////////////////////////
// #region CompiledPatterns

fn _compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid built-in pattern {pattern:?}: {err}"))
}

pub(crate) static RE_FOOTNOTE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| _compile(PAT_FOOTNOTE_MARKER));
pub(crate) static RE_TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| _compile(PAT_TABLE_ROW));
pub(crate) static RE_SIGNIF_LEGEND: LazyLock<Regex> =
    LazyLock::new(|| _compile(PAT_SIGNIF_LEGEND));
pub(crate) static RE_SIGNIF_TOKEN: LazyLock<Regex> = LazyLock::new(|| _compile(PAT_SIGNIF_TOKEN));
pub(crate) static RE_NUMERIC_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| _compile(PAT_NUMERIC_LITERAL));

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LinePreprocessing

/// Trim, drop `[n]` footnote markers, and trim again.
pub fn clean_line(raw: &str) -> String {
    let c_line = raw.trim();
    if !c_line.contains('[') {
        return c_line.to_string();
    }
    RE_FOOTNOTE_MARKER
        .replace_all(c_line, "")
        .trim()
        .to_string()
}

/// True if a cleaned line is a `$name` prompt artifact.
pub fn is_prompt_artifact(line: &str) -> bool {
    line.starts_with(C_PREFIX_PROMPT_ARTIFACT)
}

/// True if a cleaned line has the generic numeric-table row shape.
pub fn is_table_row_shape(line: &str) -> bool {
    RE_TABLE_ROW.is_match(line)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Tokenizers

/// Split on runs of whitespace.
pub fn split_on_whitespace(line: &str) -> Vec<String> {
    line.split_whitespace().map(ToString::to_string).collect()
}

/// Split on `,`, trim each token, drop empty tokens.
pub fn split_on_comma(line: &str) -> Vec<String> {
    line.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Extract significance legend tokens (`0.05 ‘.’`, bare integers).
pub fn extract_signif_tokens(line: &str) -> Vec<String> {
    RE_SIGNIF_TOKEN
        .find_iter(line)
        .map(|m| m.as_str().trim())
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// True if the line carries a significance legend.
pub fn is_signif_legend(line: &str) -> bool {
    RE_SIGNIF_LEGEND.is_match(line)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region NumericLiterals

/// True if the trimmed text is a full signed decimal literal.
pub fn is_numeric_literal(text: &str) -> bool {
    RE_NUMERIC_LITERAL.is_match(text.trim())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Workers

/// Resolve worker count from an optional user limit.
pub fn calculate_worker_limit(num_workers_max: Option<usize>) -> usize {
    let n_cpu = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);

    match num_workers_max {
        Some(n) => n.clamp(1, n_cpu),
        None => n_cpu.clamp(1, N_WORKERS_DEFAULT_MAX),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_line_strips_footnote_markers() {
        assert_eq!(clean_line("  [1] 3.21  "), "3.21");
        assert_eq!(clean_line("a [12] b"), "a  b");
        assert_eq!(clean_line("[x] kept"), "[x] kept");
        assert_eq!(clean_line("[1]"), "");
    }

    #[test]
    fn test_table_row_shape_is_prefix_match() {
        assert!(is_table_row_shape("Rep 2 0.45 0.22 1.3 0.31"));
        assert!(is_table_row_shape("T1:V2 12.3 a"));
        assert!(is_table_row_shape("Residuals 10 <2e-16 ***"));
        assert!(!is_table_row_shape("Trt  Df  1"));
        assert!(!is_table_row_shape("Only"));
        assert!(!is_table_row_shape("SEm± 0.5"));
    }

    #[test]
    fn test_split_on_comma_drops_empty_tokens() {
        assert_eq!(
            split_on_comma("SEm± = 0.5, , CD = 1.2,"),
            vec!["SEm± = 0.5".to_string(), "CD = 1.2".to_string()]
        );
    }

    #[test]
    fn test_numeric_literal_requires_full_match() {
        assert!(is_numeric_literal("12"));
        assert!(is_numeric_literal(" -1.5e-3 "));
        assert!(is_numeric_literal("+7E2"));
        assert!(!is_numeric_literal("12a"));
        assert!(!is_numeric_literal(".5"));
        assert!(!is_numeric_literal("5."));
        assert!(!is_numeric_literal("1,000"));
    }

    #[test]
    fn test_calculate_worker_limit_is_at_least_one() {
        assert_eq!(calculate_worker_limit(Some(0)), 1);
        assert!(calculate_worker_limit(None) >= 1);
    }
}
