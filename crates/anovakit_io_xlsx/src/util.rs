//! Stateless helper utilities used by the reader and writer kernels.

use std::collections::BTreeSet;

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{SpecSheetSlice, SpecXlsxReport};

////////////////////////////////////////////////////////////////////////////////
// #region SheetSelection

/// Keep workbook sheets in workbook order, optionally restricted to `requested`.
///
/// Every requested name must exist in the workbook.
pub fn select_sheet_names(
    sheet_names_all: &[String],
    requested: Option<&[String]>,
) -> Result<Vec<String>, String> {
    let Some(requested) = requested else {
        return Ok(sheet_names_all.to_vec());
    };

    let set_all: BTreeSet<&str> = sheet_names_all.iter().map(String::as_str).collect();
    let l_missing: Vec<&str> = requested
        .iter()
        .map(String::as_str)
        .filter(|name| !set_all.contains(name))
        .collect();
    if !l_missing.is_empty() {
        return Err(format!(
            "Sheet(s) not found: {l_missing:?}. Available: {sheet_names_all:?}"
        ));
    }

    let set_requested: BTreeSet<&str> = requested.iter().map(String::as_str).collect();
    Ok(sheet_names_all
        .iter()
        .filter(|name| set_requested.contains(name.as_str()))
        .cloned()
        .collect())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().trim_matches('\'').to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Split a grid into Excel-compliant sheet slices (columns first, then rows).
///
/// A grid that fits yields one slice named `sheet_name`; otherwise slices are
/// suffixed `_1`, `_2`, ... and a warning is added to `report`.
pub fn plan_sheet_slices(
    height: usize,
    width: usize,
    sheet_name: &str,
    report: &mut SpecXlsxReport,
) -> Vec<SpecSheetSlice> {
    let l_col_slices = derive_bounded_ranges(width, N_NCOLS_EXCEL_MAX);
    let l_row_slices = derive_bounded_ranges(height, N_NROWS_EXCEL_MAX);

    let n_parts_total = l_col_slices.len() * l_row_slices.len();

    let mut l_sheet_parts = Vec::with_capacity(n_parts_total);
    let mut n_idx_part = 1;
    for (col_start, col_end) in &l_col_slices {
        for (row_start, row_end) in &l_row_slices {
            let c_part_sheet_name = if n_parts_total == 1 {
                sheet_name.to_string()
            } else {
                create_sheet_identifier(sheet_name, n_idx_part)
            };

            l_sheet_parts.push(SpecSheetSlice {
                sheet_name: c_part_sheet_name,
                row_start_inclusive: *row_start,
                row_end_exclusive: *row_end,
                col_start_inclusive: *col_start,
                col_end_exclusive: *col_end,
            });
            n_idx_part += 1;
        }
    }

    if n_parts_total > 1 {
        report.warn(format!(
            "Excel limit overflow: split into {} sheets (columns-first, then rows).",
            l_sheet_parts.len()
        ));
    }

    l_sheet_parts
}

/// Cut `0..n_total` into `[start, end)` ranges of at most `n_step`; never empty.
fn derive_bounded_ranges(n_total: usize, n_step: usize) -> Vec<(usize, usize)> {
    let mut l_ranges = Vec::new();
    let mut n_start = 0;
    while n_start < n_total {
        let n_end = usize::min(n_total, n_start + n_step);
        l_ranges.push((n_start, n_end));
        n_start = n_end;
    }
    if l_ranges.is_empty() {
        l_ranges.push((0, 0));
    }
    l_ranges
}

/// Create suffixed sheet name (`base_1`, `base_2`, ...), respecting length cap.
pub fn create_sheet_identifier(base_name: &str, part_idx_1based: usize) -> String {
    let c_sheet_name_suffix = format!("_{part_idx_1based}");
    let n_len_base_name_max = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_sheet_name_suffix.len());

    let c_sheet_name_base: String = base_name
        .chars()
        .take(usize::max(1, n_len_base_name_max))
        .collect();

    format!("{c_sheet_name_base}{c_sheet_name_suffix}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn _names(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_select_sheet_names_keeps_workbook_order() {
        let l_all = _names(&["Yield", "Height", "Tillers"]);
        let l_requested = _names(&["Tillers", "Yield"]);

        assert_eq!(
            select_sheet_names(&l_all, Some(l_requested.as_slice())),
            Ok(_names(&["Yield", "Tillers"]))
        );
        assert_eq!(select_sheet_names(&l_all, None), Ok(l_all.clone()));
    }

    #[test]
    fn test_select_sheet_names_rejects_unknown() {
        let l_all = _names(&["Yield"]);
        let l_requested = _names(&["Nope"]);
        let err = select_sheet_names(&l_all, Some(l_requested.as_slice())).expect_err("unknown sheet");
        assert!(err.contains("Nope"));
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("Yield [kg/ha]", "_"), "Yield _kg_ha_");
        assert_eq!(sanitize_sheet_name("  ", "_"), "Sheet");
        assert_eq!(sanitize_sheet_name("'quoted'", "_"), "quoted");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40), "_").len(), 31);
    }

    #[test]
    fn test_plan_sheet_slices_single_part_keeps_name() {
        let mut report = SpecXlsxReport::default();
        let l_slices = plan_sheet_slices(12, 7, "Yield", &mut report);

        assert_eq!(
            l_slices,
            vec![SpecSheetSlice {
                sheet_name: "Yield".to_string(),
                row_start_inclusive: 0,
                row_end_exclusive: 12,
                col_start_inclusive: 0,
                col_end_exclusive: 7,
            }]
        );
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_plan_sheet_slices_splits_rows_over_limit() {
        let mut report = SpecXlsxReport::default();
        let l_slices = plan_sheet_slices(N_NROWS_EXCEL_MAX + 5, 3, "Yield", &mut report);

        assert_eq!(l_slices.len(), 2);
        assert_eq!(l_slices[0].sheet_name, "Yield_1");
        assert_eq!(l_slices[0].row_end_exclusive, N_NROWS_EXCEL_MAX);
        assert_eq!(l_slices[1].sheet_name, "Yield_2");
        assert_eq!(l_slices[1].row_start_inclusive, N_NROWS_EXCEL_MAX);
        assert_eq!(l_slices[1].row_end_exclusive, N_NROWS_EXCEL_MAX + 5);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_create_sheet_identifier_respects_length_cap() {
        let c_name = create_sheet_identifier(&"a".repeat(31), 12);
        assert_eq!(c_name.chars().count(), 31);
        assert!(c_name.ends_with("_12"));
    }
}
