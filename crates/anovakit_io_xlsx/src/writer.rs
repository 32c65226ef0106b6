//! XLSX writer kernel that emits parsed grids as plain worksheets.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anovakit_parse::{EnumCell, SpecSheet};
use log::{debug, warn};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::conf::N_LEN_EXCEL_SHEET_NAME_MAX;
use crate::spec::{SpecSheetSlice, SpecXlsxReport};
use crate::util::{plan_sheet_slices, sanitize_sheet_name};

/// Stateful workbook writer.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(path_file_out: PathBuf) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), String> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook
            .save(&self.path_file_out)
            .map_err(derive_xlsx_error_text)?;
        self.if_closed = true;
        Ok(())
    }

    /// Write one parsed sheet: no header row, no index column.
    ///
    /// Oversized grids are split across several worksheets.
    pub fn write_sheet(&mut self, sheet: &SpecSheet) -> Result<(), String> {
        if self.if_closed {
            return Err("Cannot write after close().".to_string());
        }

        let mut report = SpecXlsxReport {
            sheet_name_source: sheet.sheet_name.clone(),
            ..SpecXlsxReport::default()
        };

        let l_sheet_parts = plan_sheet_slices(
            sheet.height(),
            sheet.width(),
            &sanitize_sheet_name(&sheet.sheet_name, "_"),
            &mut report,
        );

        for mut sheet_slice in l_sheet_parts {
            let sheet_name_unique = self.derive_unique_sheet_name(&sheet_slice.sheet_name);
            if sheet_name_unique != sheet_slice.sheet_name {
                report.warn(format!(
                    "Sheet name {:?} already used; written as {sheet_name_unique:?}.",
                    sheet_slice.sheet_name
                ));
            }
            let worksheet = self.workbook.add_worksheet();
            worksheet
                .set_name(&sheet_name_unique)
                .map_err(derive_xlsx_error_text)?;

            write_slice(worksheet, sheet, &sheet_slice)?;
            debug!(
                "Wrote sheet {sheet_name_unique:?}: rows={} cols={}",
                sheet_slice.row_end_exclusive - sheet_slice.row_start_inclusive,
                sheet_slice.col_end_exclusive - sheet_slice.col_start_inclusive
            );

            sheet_slice.sheet_name = sheet_name_unique;
            report.sheets.push(sheet_slice);
        }

        for c_warning in &report.warnings {
            warn!("{c_warning}");
        }
        self.l_reports.push(report);
        Ok(())
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let mut n_idx = 2usize;
        loop {
            let c_suffix = format!("__{n_idx}");
            let n_len_base_max = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_suffix.len());
            let base_name: String = name.chars().take(usize::max(1, n_len_base_max)).collect();
            let candidate = format!("{base_name}{c_suffix}");
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn write_slice(
    worksheet: &mut Worksheet,
    sheet: &SpecSheet,
    sheet_slice: &SpecSheetSlice,
) -> Result<(), String> {
    let l_rows = &sheet.rows[sheet_slice.row_start_inclusive..sheet_slice.row_end_exclusive];
    for (row_idx, row) in l_rows.iter().enumerate() {
        let n_col_end = usize::min(sheet_slice.col_end_exclusive, row.len());
        if sheet_slice.col_start_inclusive >= n_col_end {
            continue;
        }
        let l_cells = &row[sheet_slice.col_start_inclusive..n_col_end];
        for (col_idx, cell) in l_cells.iter().enumerate() {
            write_cell(worksheet, row_idx, col_idx, cell)?;
        }
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCell,
) -> Result<(), String> {
    match value {
        EnumCell::Text(val) if val.is_empty() => {}
        EnumCell::Text(val) => {
            worksheet
                .write_string(cast_row_num(row_idx)?, cast_col_num(col_idx)?, val)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCell::Integer(val) => {
            worksheet
                .write_number(cast_row_num(row_idx)?, cast_col_num(col_idx)?, *val as f64)
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCell::Float(val) if !val.is_finite() => {
            worksheet
                .write_string(
                    cast_row_num(row_idx)?,
                    cast_col_num(col_idx)?,
                    val.to_string(),
                )
                .map_err(derive_xlsx_error_text)?;
        }
        EnumCell::Float(val) => {
            worksheet
                .write_number(cast_row_num(row_idx)?, cast_col_num(col_idx)?, *val)
                .map_err(derive_xlsx_error_text)?;
        }
    }
    Ok(())
}

fn cast_row_num(value: usize) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("row index overflow: {value}"))
}

fn cast_col_num(value: usize) -> Result<u16, String> {
    u16::try_from(value).map_err(|_| format!("column index overflow: {value}"))
}

fn derive_xlsx_error_text(err: XlsxError) -> String {
    format!("xlsx write error: {err}")
}

#[cfg(test)]
mod tests {
    use calamine::{Data, Reader, open_workbook_auto};

    use super::*;
    use crate::test_util::TestDir;

    fn _sheet(name: &str, rows: Vec<Vec<EnumCell>>) -> SpecSheet {
        SpecSheet {
            sheet_name: name.to_string(),
            rows,
        }
    }

    #[test]
    fn write_sheet_round_trips_cell_types() {
        let tmp = TestDir::new();
        let path_out = tmp.path().join("out.xlsx");

        let mut writer = XlsxWriter::new(path_out.clone());
        writer
            .write_sheet(&_sheet(
                "Yield",
                vec![
                    vec![
                        EnumCell::from("Trt"),
                        EnumCell::Integer(4),
                        EnumCell::Float(12.5),
                    ],
                    vec![EnumCell::empty(), EnumCell::empty(), EnumCell::empty()],
                    vec![
                        EnumCell::from("MSerror"),
                        EnumCell::from("="),
                        EnumCell::Float(f64::INFINITY),
                    ],
                ],
            ))
            .expect("write sheet");
        writer.close().expect("close");

        let mut workbook = open_workbook_auto(&path_out).expect("open written workbook");
        assert_eq!(workbook.sheet_names(), vec!["Yield".to_string()]);
        let range = workbook.worksheet_range("Yield").expect("read sheet");

        assert_eq!(
            range.get_value((0, 0)),
            Some(&Data::String("Trt".to_string()))
        );
        assert_eq!(range.get_value((0, 1)), Some(&Data::Float(4.0)));
        assert_eq!(range.get_value((0, 2)), Some(&Data::Float(12.5)));
        assert!(matches!(range.get_value((1, 0)), None | Some(Data::Empty)));
        assert_eq!(
            range.get_value((2, 2)),
            Some(&Data::String("inf".to_string()))
        );
    }

    #[test]
    fn write_sheet_dedupes_and_sanitizes_names() {
        let tmp = TestDir::new();
        let path_out = tmp.path().join("out.xlsx");

        let mut writer = XlsxWriter::new(path_out.clone());
        let l_row = vec![vec![EnumCell::from("x")]];
        writer
            .write_sheet(&_sheet("Yield/ha", l_row.clone()))
            .expect("first");
        writer
            .write_sheet(&_sheet("Yield?ha", l_row))
            .expect("second");
        writer.close().expect("close");

        let l_reports = writer.report();
        assert_eq!(l_reports.len(), 2);
        assert_eq!(l_reports[0].sheets[0].sheet_name, "Yield_ha");
        assert_eq!(l_reports[1].sheet_name_source, "Yield?ha");
        assert_eq!(l_reports[1].sheets[0].sheet_name, "Yield_ha__2");
        assert_eq!(l_reports[1].warnings.len(), 1);

        let workbook = open_workbook_auto(&path_out).expect("open written workbook");
        assert_eq!(
            workbook.sheet_names(),
            vec!["Yield_ha".to_string(), "Yield_ha__2".to_string()]
        );
    }

    #[test]
    fn derive_unique_sheet_name_survives_many_long_collisions() {
        let tmp = TestDir::new();
        let mut writer = XlsxWriter::new(tmp.path().join("out.xlsx"));
        let c_name = "x".repeat(N_LEN_EXCEL_SHEET_NAME_MAX);

        let l_names: Vec<String> = (0..15)
            .map(|_| writer.derive_unique_sheet_name(&c_name))
            .collect();

        let set_names: BTreeSet<&String> = l_names.iter().collect();
        assert_eq!(set_names.len(), 15);
        assert!(
            l_names
                .iter()
                .all(|name| name.chars().count() <= N_LEN_EXCEL_SHEET_NAME_MAX)
        );
        assert!(l_names[1].ends_with("__2"));
        assert!(l_names[14].ends_with("__15"));
    }

    #[test]
    fn close_is_idempotent_and_blocks_writes() {
        let tmp = TestDir::new();
        let mut writer = XlsxWriter::new(tmp.path().join("out.xlsx"));
        writer
            .write_sheet(&_sheet("A", vec![vec![EnumCell::Integer(1)]]))
            .expect("write");

        writer.close().expect("close");
        writer.close().expect("close again");
        assert!(tmp.path().join("out.xlsx").exists());

        let err = writer
            .write_sheet(&_sheet("B", vec![vec![EnumCell::Integer(2)]]))
            .expect_err("write after close");
        assert!(err.contains("close"));
    }
}
