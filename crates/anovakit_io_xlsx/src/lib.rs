//! `anovakit_io_xlsx` v1:
//! Workbook I/O around `anovakit_parse`.
//!
//! Modules:
//! - `conf`     : Excel limits and default paths
//! - `spec`     : options, slice/report models, error type
//! - `util`     : pure helper functions
//! - `reader`   : calamine-backed source reader
//! - `writer`   : rust_xlsxwriter-backed output writer
//! - `report`   : whole-conversion report
//! - `pipeline` : read → parse → write driver
pub mod conf;
pub mod pipeline;
pub mod reader;
pub mod report;
pub mod spec;
pub mod util;
pub mod writer;

#[cfg(test)]
mod test_util;

pub use conf::{
    C_PATH_FILE_IN_DEFAULT, C_PATH_FILE_OUT_DEFAULT, N_COL_IDX_TEXT_DEFAULT,
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
pub use pipeline::convert_workbook;
pub use reader::read_workbook_lines;
pub use report::ReportConvert;
pub use spec::{
    SpecConvertOptions, SpecSheetSlice, SpecXlsxReadOptions, SpecXlsxReport, XlsxConvertError,
};
pub use util::{plan_sheet_slices, sanitize_sheet_name, select_sheet_names};
pub use writer::XlsxWriter;
