//! Read → parse → write driver for whole workbooks.

use std::path::Path;

use anovakit_parse::parse_sheets;
use log::{info, warn};

use crate::reader::read_workbook_lines;
use crate::report::ReportConvert;
use crate::spec::{SpecConvertOptions, XlsxConvertError};
use crate::writer::XlsxWriter;

/// Convert every printed-output sheet of `file_in` into a parsed sheet of `file_out`.
///
/// Sheets keep their source order. A sheet that yields no rows is skipped with a
/// warning; when nothing is written the destination still gets a default blank
/// worksheet.
pub fn convert_workbook<P, Q>(
    file_in: P,
    file_out: Q,
    options: &SpecConvertOptions,
) -> Result<ReportConvert, XlsxConvertError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_file_in = file_in.as_ref();
    let path_file_out = file_out.as_ref();
    if path_file_in == path_file_out {
        return Err(XlsxConvertError::InvalidOptions(format!(
            "Destination must differ from source: {}",
            path_file_in.display()
        )));
    }

    let l_sheet_lines = read_workbook_lines(path_file_in, &options.read_options)?;
    info!(
        "Read {} sheet(s) from {}",
        l_sheet_lines.len(),
        path_file_in.display()
    );

    let l_parsed = parse_sheets(l_sheet_lines, &options.parse_options);

    if options.if_create_parent_dir {
        if let Some(path_dir_parent) = path_file_out.parent() {
            if !path_dir_parent.as_os_str().is_empty() {
                std::fs::create_dir_all(path_dir_parent).map_err(|err| {
                    XlsxConvertError::DestinationUnwritable {
                        path: path_file_out.to_path_buf(),
                        message: err.to_string(),
                    }
                })?;
            }
        }
    }

    let derive_write_error = |message: String| XlsxConvertError::DestinationUnwritable {
        path: path_file_out.to_path_buf(),
        message,
    };

    let mut report = ReportConvert {
        file_in: path_file_in.to_path_buf(),
        file_out: path_file_out.to_path_buf(),
        ..ReportConvert::default()
    };
    let mut writer = XlsxWriter::new(path_file_out.to_path_buf());
    for (sheet, report_parse) in l_parsed {
        if sheet.is_empty() {
            let c_warning = format!("Sheet {:?} produced no rows; skipped.", sheet.sheet_name);
            warn!("{c_warning}");
            report.warnings.push(c_warning);
            report.sheets_skipped.push(sheet.sheet_name.clone());
        } else {
            writer.write_sheet(&sheet).map_err(derive_write_error)?;
            report.sheets_written.push(sheet.sheet_name.clone());
        }
        report.reports_parse.push(report_parse);
    }

    if report.sheets_written.is_empty() {
        let c_warning = "No sheet produced rows; destination holds a blank worksheet.".to_string();
        warn!("{c_warning}");
        report.warnings.push(c_warning);
    }

    writer.close().map_err(derive_write_error)?;
    report.reports_xlsx = writer.report();
    info!("{report}");

    Ok(report)
}
