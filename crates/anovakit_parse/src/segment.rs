//! Per-sheet line scanner that buffers numeric-table rows into segments.

use log::debug;

use crate::report::ReportParseBuilder;
use crate::rule::match_line_rule;
use crate::spec::{EnumLineKind, TypeRawRow};
use crate::util::{clean_line, is_prompt_artifact, is_table_row_shape};

/// Scan state for one sheet.
///
/// Rows are appended to `l_rows_out` in scan order, except table rows, which wait
/// in `l_rows_pending` until a blank line, an unmatched line, or end of input
/// flushes them as one segment followed by an empty separator row.
#[derive(Debug, Default)]
pub struct TableSegmenter {
    if_in_table: bool,
    l_rows_pending: Vec<TypeRawRow>,
    l_rows_out: Vec<TypeRawRow>,
    builder_report: ReportParseBuilder,
}

impl TableSegmenter {
    /// Create an empty segmenter.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a numeric table is open.
    pub fn is_in_table(&self) -> bool {
        self.if_in_table
    }

    /// Rows buffered for the open segment.
    pub fn pending(&self) -> &[TypeRawRow] {
        &self.l_rows_pending
    }

    /// Rows emitted so far (excluding the open segment).
    pub fn output(&self) -> &[TypeRawRow] {
        &self.l_rows_out
    }

    /// Feed one raw line.
    pub fn push_line(&mut self, raw: &str) {
        self.builder_report.add_line();

        let c_line = clean_line(raw);
        if is_prompt_artifact(&c_line) {
            self.builder_report.add_skipped();
            return;
        }

        if c_line.is_empty() {
            self.builder_report.add_blank();
            self.close_table();
            return;
        }

        let (enum_kind, c_line_rule, l_tokens) = match match_line_rule(&c_line) {
            Some(rule) => {
                let c_line_rule = (rule.prepare)(&c_line);
                (rule.kind, c_line_rule, (rule.split)(c_line_rule))
            }
            None => (EnumLineKind::Text, c_line.as_str(), vec![c_line.clone()]),
        };
        self.builder_report.add_kind(enum_kind);
        match enum_kind {
            EnumLineKind::TableRow => self.if_in_table = true,
            EnumLineKind::Text => self.close_table(),
            _ => {}
        }

        // Summary lines that also have the table-row shape stay inside the segment.
        if self.if_in_table && is_table_row_shape(c_line_rule) {
            self.l_rows_pending.push(l_tokens);
        } else {
            self.l_rows_out.push(l_tokens);
        }
    }

    /// Flush any open segment and return rows plus partial report.
    pub fn finish(mut self) -> (Vec<TypeRawRow>, ReportParseBuilder) {
        self.flush_pending();
        (self.l_rows_out, self.builder_report)
    }

    fn close_table(&mut self) {
        if self.if_in_table {
            self.flush_pending();
        }
        self.if_in_table = false;
    }

    fn flush_pending(&mut self) {
        if self.l_rows_pending.is_empty() {
            return;
        }
        debug!(
            "Flushing table segment: rows={}, output_rows={}",
            self.l_rows_pending.len(),
            self.l_rows_out.len()
        );
        self.l_rows_out.append(&mut self.l_rows_pending);
        self.l_rows_out.push(Vec::new());
        self.builder_report.add_segment();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _scan(lines: &[&str]) -> Vec<TypeRawRow> {
        let mut segmenter = TableSegmenter::new();
        for line in lines {
            segmenter.push_line(line);
        }
        segmenter.finish().0
    }

    fn _row(values: &[&str]) -> TypeRawRow {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_blank_run_collapses_to_one_separator() {
        let l_rows = _scan(&["Rep 2 0.45", "Trt 4 1.20", "", "", "   ", "Note"]);
        assert_eq!(
            l_rows,
            vec![
                _row(&["Rep", "2", "0.45"]),
                _row(&["Trt", "4", "1.20"]),
                vec![],
                _row(&["Note"]),
            ]
        );
    }

    #[test]
    fn test_blank_lines_outside_table_emit_nothing() {
        let l_rows = _scan(&["", "Note", "", "", "Other"]);
        assert_eq!(l_rows, vec![_row(&["Note"]), _row(&["Other"])]);
    }

    #[test]
    fn test_prompt_artifacts_do_not_touch_state() {
        let mut segmenter = TableSegmenter::new();
        segmenter.push_line("Rep 2 0.45");
        segmenter.push_line("$Yield");
        assert!(segmenter.is_in_table());
        assert_eq!(segmenter.pending().len(), 1);

        let (l_rows, builder) = segmenter.finish();
        assert_eq!(l_rows, vec![_row(&["Rep", "2", "0.45"]), vec![]]);
        assert_eq!(builder.cnt_skipped, 1);
    }

    #[test]
    fn test_footnote_marker_only_line_acts_as_blank() {
        let l_rows = _scan(&["Rep 2 0.45", "[1]", "Trt 4 1.20"]);
        assert_eq!(
            l_rows,
            vec![
                _row(&["Rep", "2", "0.45"]),
                vec![],
                _row(&["Trt", "4", "1.20"]),
                vec![],
            ]
        );
    }

    #[test]
    fn test_table_shaped_summary_line_stays_inside_segment() {
        let l_rows = _scan(&["Rep 2 0.45", "MSerror = 5.21", "Trt 4 1.20", ""]);
        assert_eq!(
            l_rows,
            vec![
                _row(&["Rep", "2", "0.45"]),
                _row(&["MSerror", "=", "5.21"]),
                _row(&["Trt", "4", "1.20"]),
                vec![],
            ]
        );
    }

    #[test]
    fn test_summary_line_mid_table_is_emitted_ahead_of_segment() {
        let mut segmenter = TableSegmenter::new();
        segmenter.push_line("Rep 2 0.45");
        segmenter.push_line("SEm± 0.5, CD 1.2");
        assert!(segmenter.is_in_table());
        assert_eq!(segmenter.pending().len(), 1);
        assert_eq!(segmenter.output(), &[_row(&["SEm± 0.5", "CD 1.2"])]);

        segmenter.push_line("Trt 4 1.20");
        segmenter.push_line("");
        let (l_rows, builder) = segmenter.finish();
        assert_eq!(
            l_rows,
            vec![
                _row(&["SEm± 0.5", "CD 1.2"]),
                _row(&["Rep", "2", "0.45"]),
                _row(&["Trt", "4", "1.20"]),
                vec![],
            ]
        );
        assert_eq!(builder.cnt_segments, 1);
    }

    #[test]
    fn test_quoted_standard_error_mid_table_stays_inside_segment() {
        let l_rows = _scan(&["Rep 2 0.45", "\"SEm 0.5, CD 1.2\"", "Trt 4 1.20", ""]);
        assert_eq!(
            l_rows,
            vec![
                _row(&["Rep", "2", "0.45"]),
                _row(&["SEm 0.5", "CD 1.2"]),
                _row(&["Trt", "4", "1.20"]),
                vec![],
            ]
        );
    }

    #[test]
    fn test_ascii_signif_legend_mid_table_keeps_segment_open() {
        let mut segmenter = TableSegmenter::new();
        segmenter.push_line("Rep 2 0.45");
        segmenter.push_line("Signif. codes:  0 '***' 0.001 '**' 0.01 '*' 0.05 '.' 0.1 ' ' 1");
        assert!(segmenter.is_in_table());
        assert_eq!(segmenter.pending().len(), 1);

        segmenter.push_line("Trt 4 1.20");
        segmenter.push_line("");
        let (l_rows, builder) = segmenter.finish();
        assert_eq!(
            l_rows,
            vec![
                _row(&["0 '***'", "0.001 '**'", "0.01 '*'", "0.05 '.'", "0.1 ' '", "1"]),
                _row(&["Rep", "2", "0.45"]),
                _row(&["Trt", "4", "1.20"]),
                vec![],
            ]
        );
        assert_eq!(builder.cnt_segments, 1);
        assert_eq!(builder.cnt_by_kind.get(&EnumLineKind::SignifLegend), Some(&1));
    }

    #[test]
    fn test_unmatched_line_flushes_open_segment_first() {
        let l_rows = _scan(&["Rep 2 0.45", "Trt 4 1.20", "Means with the same letter"]);
        assert_eq!(
            l_rows,
            vec![
                _row(&["Rep", "2", "0.45"]),
                _row(&["Trt", "4", "1.20"]),
                vec![],
                _row(&["Means with the same letter"]),
            ]
        );
    }

    #[test]
    fn test_end_of_input_flushes_with_trailing_separator() {
        let l_rows = _scan(&["Note", "Rep 2 0.45"]);
        assert_eq!(
            l_rows,
            vec![_row(&["Note"]), _row(&["Rep", "2", "0.45"]), vec![]]
        );
    }

    #[test]
    fn test_table_shaped_line_outside_table_goes_to_output() {
        // W-lines never open a table, so a shaped W-line before any table row is
        // emitted directly.
        let l_rows = _scan(&["W = 0.98, p-value = 0.21"]);
        assert_eq!(l_rows, vec![_row(&["W = 0.98", "p-value = 0.21"])]);
    }
}
