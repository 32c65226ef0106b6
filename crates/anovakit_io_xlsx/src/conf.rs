//! XLSX constants and default locations.

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Default workbook holding printed ANOVA output, one line per cell.
pub const C_PATH_FILE_IN_DEFAULT: &str = "data/pooled_rbd_all_traits_printed_output.xlsx";
/// Default destination workbook.
pub const C_PATH_FILE_OUT_DEFAULT: &str = "output/long_anova_pooled_ready.xlsx";

/// Zero-based column holding the printed text.
pub const N_COL_IDX_TEXT_DEFAULT: usize = 0;
