//! Source workbook reader: one column of printed text per sheet.

use std::path::Path;

use anovakit_parse::SpecSheetLines;
use calamine::{Data, Range, Reader, open_workbook_auto};
use log::debug;

use crate::spec::{SpecXlsxReadOptions, XlsxConvertError};
use crate::util::select_sheet_names;

/// Read every selected sheet's text column, in workbook order.
///
/// Any format `calamine` detects from the extension is accepted (xlsx, xlsm,
/// xlsb, xls, ods).
pub fn read_workbook_lines(
    path_file_in: &Path,
    options: &SpecXlsxReadOptions,
) -> Result<Vec<SpecSheetLines>, XlsxConvertError> {
    let mut workbook =
        open_workbook_auto(path_file_in).map_err(|err| XlsxConvertError::SourceUnreadable {
            path: path_file_in.to_path_buf(),
            message: err.to_string(),
        })?;

    let l_sheet_names = select_sheet_names(&workbook.sheet_names(), options.sheet_names.as_deref())
        .map_err(XlsxConvertError::InvalidOptions)?;
    let n_col_idx = u32::try_from(options.col_idx_text).map_err(|_| {
        XlsxConvertError::InvalidOptions(format!(
            "col_idx_text out of range: {}",
            options.col_idx_text
        ))
    })?;

    let mut l_sheets = Vec::with_capacity(l_sheet_names.len());
    for sheet_name in l_sheet_names {
        let range = workbook.worksheet_range(&sheet_name).map_err(|err| {
            XlsxConvertError::SheetUnreadable {
                sheet_name: sheet_name.clone(),
                message: err.to_string(),
            }
        })?;
        let lines = derive_column_lines(&range, n_col_idx, options.if_keep_missing_cells);
        debug!("Read sheet {sheet_name:?}: lines={}", lines.len());
        l_sheets.push(SpecSheetLines { sheet_name, lines });
    }

    Ok(l_sheets)
}

/// Collect one column from the first to the last used row.
///
/// Missing cells are dropped unless `if_keep_missing_cells`, in which case they
/// become empty lines.
pub fn derive_column_lines(
    range: &Range<Data>,
    col_idx: u32,
    if_keep_missing_cells: bool,
) -> Vec<String> {
    let (Some((n_row_start, _)), Some((n_row_end, _))) = (range.start(), range.end()) else {
        return vec![];
    };

    let mut l_lines = Vec::new();
    for n_row in n_row_start..=n_row_end {
        match range.get_value((n_row, col_idx)).and_then(derive_cell_text) {
            Some(c_text) => l_lines.push(c_text),
            None if if_keep_missing_cells => l_lines.push(String::new()),
            None => {}
        }
    }
    l_lines
}

/// Text form of a source cell; `None` for empty cells.
pub fn derive_cell_text(value: &Data) -> Option<String> {
    match value {
        Data::Empty => None,
        Data::String(val) => Some(val.clone()),
        _ => Some(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _range(values: Vec<Data>) -> Range<Data> {
        let n_rows = values.len() as u32;
        let mut range = Range::new((0, 0), (n_rows.saturating_sub(1), 1));
        for (n_idx, value) in values.into_iter().enumerate() {
            range.set_value((n_idx as u32, 0), value);
        }
        range
    }

    #[test]
    fn test_derive_column_lines_drops_missing_by_default() {
        let range = _range(vec![
            Data::String("Rep 2 0.45".to_string()),
            Data::Empty,
            Data::Float(3.0),
            Data::String("  ".to_string()),
        ]);

        assert_eq!(
            derive_column_lines(&range, 0, false),
            vec!["Rep 2 0.45".to_string(), "3".to_string(), "  ".to_string()]
        );
    }

    #[test]
    fn test_derive_column_lines_keeps_missing_as_blank() {
        let range = _range(vec![
            Data::String("Rep 2 0.45".to_string()),
            Data::Empty,
            Data::Bool(true),
        ]);

        assert_eq!(
            derive_column_lines(&range, 0, true),
            vec!["Rep 2 0.45".to_string(), String::new(), "true".to_string()]
        );
    }

    #[test]
    fn test_derive_column_lines_out_of_range_column() {
        let range = _range(vec![Data::String("x".to_string())]);
        assert!(derive_column_lines(&range, 5, false).is_empty());
        assert_eq!(derive_column_lines(&range, 5, true), vec![String::new()]);
    }

    #[test]
    fn test_derive_column_lines_empty_range() {
        let range: Range<Data> = Range::empty();
        assert!(derive_column_lines(&range, 0, true).is_empty());
    }
}
