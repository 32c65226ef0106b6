use std::collections::BTreeMap;

use anovakit_io_xlsx::{
    ReportConvert, SpecConvertOptions, SpecXlsxReadOptions, XlsxConvertError, convert_workbook,
};
use anovakit_parse::util::clean_line;
use anovakit_parse::{EnumCell, ReportParse, SpecParseOptions, classify_line, parse_lines};
use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "anovakit.parse.printed_anova.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

#[pyclass(name = "ReportParse")]
#[derive(Debug, Clone)]
struct PyReportParse {
    report: ReportParse,
}

#[pymethods]
impl PyReportParse {
    #[getter]
    fn sheet_name(&self) -> String {
        self.report.sheet_name.clone()
    }

    #[getter]
    fn cnt_rows(&self) -> u64 {
        self.report.cnt_rows
    }

    #[getter]
    fn width(&self) -> u64 {
        self.report.width
    }

    #[getter]
    fn warnings(&self) -> Vec<String> {
        self.report.warnings.clone()
    }

    fn to_dict(&self) -> BTreeMap<String, u64> {
        self.report.to_dict()
    }

    #[pyo3(signature = (prefix = "[PARSE]"))]
    fn format(&self, prefix: &str) -> String {
        self.report.format(prefix)
    }

    fn __str__(&self) -> String {
        self.report.to_string()
    }
}

#[pyclass(name = "ReportConvert")]
#[derive(Debug, Clone)]
struct PyReportConvert {
    report: ReportConvert,
}

impl From<ReportConvert> for PyReportConvert {
    fn from(report: ReportConvert) -> Self {
        Self { report }
    }
}

#[pymethods]
impl PyReportConvert {
    #[getter]
    fn file_in(&self) -> String {
        self.report.file_in.to_string_lossy().to_string()
    }

    #[getter]
    fn file_out(&self) -> String {
        self.report.file_out.to_string_lossy().to_string()
    }

    #[getter]
    fn sheets_written(&self) -> Vec<String> {
        self.report.sheets_written.clone()
    }

    #[getter]
    fn sheets_skipped(&self) -> Vec<String> {
        self.report.sheets_skipped.clone()
    }

    #[getter]
    fn reports_parse(&self) -> Vec<PyReportParse> {
        self.report
            .reports_parse
            .iter()
            .cloned()
            .map(|report| PyReportParse { report })
            .collect()
    }

    #[getter]
    fn cnt_rows(&self) -> u64 {
        self.report.cnt_rows()
    }

    #[getter]
    fn warnings(&self) -> Vec<String> {
        self.report.warnings.clone()
    }

    #[getter]
    fn warning_count(&self) -> usize {
        self.report.warning_count()
    }

    fn to_dict(&self) -> BTreeMap<String, u64> {
        self.report.to_dict()
    }

    #[pyo3(signature = (prefix = "[CONVERT]"))]
    fn format(&self, prefix: &str) -> String {
        self.report.format(prefix)
    }

    fn __str__(&self) -> String {
        self.report.to_string()
    }
}

fn map_convert_error(exception: XlsxConvertError) -> PyErr {
    match exception {
        XlsxConvertError::SourceUnreadable { .. }
        | XlsxConvertError::SheetUnreadable { .. }
        | XlsxConvertError::DestinationUnwritable { .. } => {
            PyOSError::new_err(exception.to_string())
        }
        XlsxConvertError::InvalidOptions(message) => PyValueError::new_err(message),
    }
}

fn derive_py_cell(py: Python<'_>, cell: EnumCell) -> PyResult<PyObject> {
    let obj = match cell {
        EnumCell::Text(val) => val.into_pyobject(py)?.into_any().unbind(),
        EnumCell::Integer(val) => val.into_pyobject(py)?.into_any().unbind(),
        EnumCell::Float(val) => val.into_pyobject(py)?.into_any().unbind(),
    };
    Ok(obj)
}

/// Parse one sheet's printed lines; `None` entries count as blank lines.
#[pyfunction(name = "parse_lines")]
fn parse_lines_py(py: Python<'_>, lines: Vec<Option<String>>) -> PyResult<Vec<Vec<PyObject>>> {
    let l_rows =
        py.allow_threads(|| parse_lines(lines.into_iter().map(Option::unwrap_or_default)));
    l_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| derive_py_cell(py, cell))
                .collect::<PyResult<Vec<_>>>()
        })
        .collect()
}

/// Classify one printed line; returns `(kind, tokens)`.
#[pyfunction(name = "classify_line")]
fn classify_line_py(line: &str) -> (String, Vec<String>) {
    let (enum_kind, l_tokens) = classify_line(&clean_line(line));
    (enum_kind.name().to_string(), l_tokens)
}

#[pyfunction(name = "convert_workbook")]
#[pyo3(signature = (
    file_in,
    file_out,
    col_idx_text = 0,
    sheet_names = None,
    if_keep_missing_cells = false,
    num_workers_max = None,
    if_create_parent_dir = true
))]
#[allow(clippy::too_many_arguments)]
fn convert_workbook_py(
    py: Python<'_>,
    file_in: String,
    file_out: String,
    col_idx_text: usize,
    sheet_names: Option<Vec<String>>,
    if_keep_missing_cells: bool,
    num_workers_max: Option<usize>,
    if_create_parent_dir: bool,
) -> PyResult<PyReportConvert> {
    if num_workers_max == Some(0) {
        return Err(PyValueError::new_err("num_workers_max must be >= 1."));
    }
    let spec_options = SpecConvertOptions {
        read_options: SpecXlsxReadOptions {
            col_idx_text,
            if_keep_missing_cells,
            sheet_names,
        },
        parse_options: SpecParseOptions { num_workers_max },
        if_create_parent_dir,
    };

    let report = py.allow_threads(|| convert_workbook(&file_in, &file_out, &spec_options));
    let report = report.map_err(map_convert_error)?;
    Ok(PyReportConvert::from(report))
}

#[pymodule]
fn _anovakit_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyReportParse>()?;
    module.add_class::<PyReportConvert>()?;
    module.add_function(wrap_pyfunction!(parse_lines_py, module)?)?;
    module.add_function(wrap_pyfunction!(classify_line_py, module)?)?;
    module.add_function(wrap_pyfunction!(convert_workbook_py, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
