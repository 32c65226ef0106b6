//! Sheet-level entry points: scan, normalize, and fan out across sheets.

use log::{debug, warn};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::normalize::normalize_rows;
use crate::report::ReportParse;
use crate::segment::TableSegmenter;
use crate::spec::{SpecParseOptions, SpecSheet, SpecSheetLines, TypeRow};
use crate::util::calculate_worker_limit;

/// Parse one sheet's raw lines into a rectangular, type-coerced grid.
///
/// This is the whole core pipeline: scan lines through a fresh
/// [`TableSegmenter`], then pad and coerce. It never fails; lines of unknown
/// shape become single-cell rows.
pub fn parse_lines<I, S>(lines: I) -> Vec<TypeRow>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_sheet("", lines).0.rows
}

/// Parse one named sheet and report what happened.
pub fn parse_sheet<I, S>(sheet_name: &str, lines: I) -> (SpecSheet, ReportParse)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segmenter = TableSegmenter::new();
    for line in lines {
        segmenter.push_line(line.as_ref());
    }
    let (l_rows_raw, builder_report) = segmenter.finish();
    let (l_rows, n_coerced) = normalize_rows(l_rows_raw);

    let mut report = builder_report.build(sheet_name);
    report.cnt_rows = l_rows.len() as u64;
    report.width = l_rows.first().map_or(0, Vec::len) as u64;
    report.cnt_coerced = n_coerced as u64;
    debug!("{report}");

    (
        SpecSheet {
            sheet_name: sheet_name.to_string(),
            rows: l_rows,
        },
        report,
    )
}

/// Parse many sheets independently, preserving input order.
///
/// Sheets are processed on a bounded rayon pool. If the pool cannot be built the
/// run falls back to serial parsing and records a warning on the first report.
pub fn parse_sheets(
    sheets: Vec<SpecSheetLines>,
    options: &SpecParseOptions,
) -> Vec<(SpecSheet, ReportParse)> {
    let n_workers_max = calculate_worker_limit(options.num_workers_max);
    let parse_one =
        |spec_lines: SpecSheetLines| parse_sheet(&spec_lines.sheet_name, spec_lines.lines);

    if n_workers_max <= 1 || sheets.len() <= 1 {
        return sheets.into_iter().map(parse_one).collect();
    }

    let thread_pool = ThreadPoolBuilder::new()
        .num_threads(n_workers_max)
        .build();
    let Ok(thread_pool) = thread_pool else {
        let c_warning = format!(
            "Failed to initialize thread pool (workers={n_workers_max}); fallback to serial parse."
        );
        warn!("{c_warning}");
        let mut l_results: Vec<_> = sheets.into_iter().map(parse_one).collect();
        if let Some((_, report)) = l_results.first_mut() {
            report.warnings.push(c_warning);
        }
        return l_results;
    };

    thread_pool.install(|| sheets.into_par_iter().map(parse_one).collect())
}
