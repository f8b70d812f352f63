use std::collections::BTreeMap;
use std::path::PathBuf;

use liftkit_e1rm::{
    E1rmError, ReportE1rm, SpecE1rmOptions, derive_default_e1rm_options, estimate_e1rm,
    process_sheets,
};
use liftkit_io_xlsx::{
    C_SHEET_NAME_OUTPUT, E1rmXlsxWriter, SpecXlsxReport, SpecXlsxWriteOptions, XlsxIoError,
    read_csv_tables,
};
use liftkit_log::{EnumLogFormat, LogInitError, SpecLogOptions, init_logging};
use pyo3::exceptions::{PyOSError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "liftkit.e1rm.process_workout_log.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

#[pyclass(name = "ReportE1rm")]
#[derive(Debug, Clone)]
struct PyReportE1rm {
    report: ReportE1rm,
    #[pyo3(get)]
    file_out: String,
    #[pyo3(get)]
    sheet_name: String,
    #[pyo3(get)]
    chart_sheets: Vec<String>,
}

impl PyReportE1rm {
    fn from_reports(
        mut report_e1rm: ReportE1rm,
        report_xlsx: SpecXlsxReport,
        file_out: String,
    ) -> Self {
        report_e1rm.warnings.extend(report_xlsx.warnings);
        Self {
            report: report_e1rm,
            file_out,
            sheet_name: report_xlsx.sheet_name,
            chart_sheets: report_xlsx.chart_sheets,
        }
    }
}

#[pymethods]
impl PyReportE1rm {
    #[getter]
    fn cnt_sheets(&self) -> u64 {
        self.report.cnt_sheets
    }

    #[getter]
    fn cnt_sheets_skipped(&self) -> u64 {
        self.report.cnt_sheets_skipped
    }

    #[getter]
    fn cnt_scanned(&self) -> u64 {
        self.report.cnt_scanned
    }

    #[getter]
    fn cnt_accepted(&self) -> u64 {
        self.report.cnt_accepted
    }

    #[getter]
    fn cnt_rejected(&self) -> u64 {
        self.report.cnt_rejected
    }

    #[getter]
    fn cnt_dates(&self) -> u64 {
        self.report.cnt_dates
    }

    #[getter]
    fn cnt_sessions(&self) -> u64 {
        self.report.cnt_sessions
    }

    #[getter]
    fn rejections(&self) -> BTreeMap<String, u64> {
        self.report
            .rejections
            .iter()
            .map(|(reason, cnt)| (reason.as_str().to_string(), *cnt))
            .collect()
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

    #[pyo3(signature = (prefix = "[E1RM]"))]
    fn format(&self, prefix: &str) -> String {
        self.report.format(prefix)
    }

    fn __str__(&self) -> String {
        self.report.to_string()
    }
}

enum EnumProcessError {
    E1rm(E1rmError),
    Io(XlsxIoError),
}

impl From<E1rmError> for EnumProcessError {
    fn from(err: E1rmError) -> Self {
        Self::E1rm(err)
    }
}

impl From<XlsxIoError> for EnumProcessError {
    fn from(err: XlsxIoError) -> Self {
        Self::Io(err)
    }
}

fn map_e1rm_error(exception: E1rmError) -> PyErr {
    PyValueError::new_err(exception.to_string())
}

fn map_xlsx_io_error(exception: XlsxIoError) -> PyErr {
    match exception {
        XlsxIoError::Read { .. } | XlsxIoError::Write(_) => {
            PyOSError::new_err(exception.to_string())
        }
        XlsxIoError::IndexOverflow { .. } | XlsxIoError::EmptyOutput => {
            PyValueError::new_err(exception.to_string())
        }
        XlsxIoError::Closed => PyRuntimeError::new_err(exception.to_string()),
    }
}

fn map_process_error(exception: EnumProcessError) -> PyErr {
    match exception {
        EnumProcessError::E1rm(err) => map_e1rm_error(err),
        EnumProcessError::Io(err) => map_xlsx_io_error(err),
    }
}

fn map_log_init_error(exception: LogInitError) -> PyErr {
    PyValueError::new_err(exception.to_string())
}

fn run_process_workout_log(
    paths_file_in: Vec<PathBuf>,
    path_file_out: PathBuf,
    options: SpecE1rmOptions,
    write_options: SpecXlsxWriteOptions,
) -> Result<PyReportE1rm, EnumProcessError> {
    let l_tables = read_csv_tables(&paths_file_in)?;
    let run = process_sheets(&l_tables, &options)?;

    let mut writer = E1rmXlsxWriter::with_defaults(path_file_out, write_options);
    writer.write_output_table(&run.table)?;
    writer.close()?;

    let report_xlsx = writer.report().into_iter().next().unwrap_or_default();
    Ok(PyReportE1rm::from_reports(
        run.report,
        report_xlsx,
        writer.file_out(),
    ))
}

#[pyfunction(name = "process_workout_log")]
#[pyo3(signature = (
    files_in,
    file_out = "liftkit_e1rm.xlsx",
    num_workers_max = None,
    if_write_charts = true,
    sheet_name_output = C_SHEET_NAME_OUTPUT,
    log_level = None
))]
fn process_workout_log_py(
    py: Python<'_>,
    files_in: Vec<String>,
    file_out: &str,
    num_workers_max: Option<usize>,
    if_write_charts: bool,
    sheet_name_output: &str,
    log_level: Option<String>,
) -> PyResult<PyReportE1rm> {
    if let Some(level) = log_level {
        init_logging(&SpecLogOptions {
            level,
            format: EnumLogFormat::Compact,
            if_ansi: false,
        })
        .map_err(map_log_init_error)?;
    }

    let options = SpecE1rmOptions {
        num_workers_max,
        ..derive_default_e1rm_options()
    };
    let write_options = SpecXlsxWriteOptions {
        sheet_name_output: sheet_name_output.to_string(),
        if_write_charts,
        ..Default::default()
    };
    let paths_file_in: Vec<PathBuf> = files_in.into_iter().map(PathBuf::from).collect();
    let path_file_out = PathBuf::from(file_out);

    let report = py.allow_threads(|| {
        run_process_workout_log(paths_file_in, path_file_out, options, write_options)
    });
    report.map_err(map_process_error)
}

#[pyfunction(name = "estimate_e1rm")]
fn estimate_e1rm_py(reps: u32, weight: f64) -> PyResult<f64> {
    estimate_e1rm(reps, weight).map_err(map_e1rm_error)
}

#[pymodule]
fn _liftkit_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyReportE1rm>()?;
    module.add_function(wrap_pyfunction!(process_workout_log_py, module)?)?;
    module.add_function(wrap_pyfunction!(estimate_e1rm_py, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
