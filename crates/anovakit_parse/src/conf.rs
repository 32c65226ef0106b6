//! Line-shape patterns and parse defaults.

/// Bracketed integer footnote marker, e.g. `[1]`.
pub const PAT_FOOTNOTE_MARKER: &str = r"\[\d+\]";

/// Generic numeric-table row: a label token followed by numeric-ish tokens.
///
/// Prefix match only; trailing text after the last numeric token is allowed.
pub const PAT_TABLE_ROW: &str = r"^\s*[A-Za-z0-9\.:]+(\s+[<>=0-9\.\*\-e]+)+";

/// Significance legend trigger (`0 ‘***’`), curly or ASCII single quotes.
pub const PAT_SIGNIF_LEGEND: &str = r"0\s*[‘']\*\*\*[’']";

/// Significance legend token: `<number> ‘<symbol>’` pair or bare integer.
pub const PAT_SIGNIF_TOKEN: &str = r"\d+\.?\d*\s*[‘'].*?[’']|\d+";

/// Full numeric literal accepted by cell coercion.
pub const PAT_NUMERIC_LITERAL: &str = r"^[+-]?\d+(\.\d+)?([eE][+-]?\d+)?$";

/// Prefix of variable-name prompt artifacts; such lines are dropped.
pub const C_PREFIX_PROMPT_ARTIFACT: &str = "$";

/// Prefix of MSerror summary lines.
pub const C_PREFIX_MSERROR: &str = "MSerror";
/// Prefix of standard-error summary lines.
pub const C_PREFIX_SEM: &str = "SEm";
/// Prefix of quoted standard-error summary lines.
pub const C_PREFIX_SEM_QUOTED: &str = "\"SEm";
/// Prefix of test-statistic lines.
pub const C_PREFIX_W_STATISTIC: &str = "W";

/// Substrings that all appear in an ANOVA header line.
pub const TUP_ANOVA_HEADER_MARKERS: [&str; 3] = ["Df", "Sum Sq", "Mean Sq"];
/// Multi-word ANOVA header labels kept as single tokens.
pub const TUP_ANOVA_HEADER_LABELS: [(&str, &str); 2] =
    [("Sum Sq", "Sum_Sq"), ("Mean Sq", "Mean_Sq")];

/// Upper bound applied when no worker limit is configured.
pub const N_WORKERS_DEFAULT_MAX: usize = 8;
