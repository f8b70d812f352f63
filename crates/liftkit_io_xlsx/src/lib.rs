//! `liftkit_io_xlsx` v1:
//! CSV acquisition and XLSX emission around the e1RM core.
//!
//! - `conf`   : constants and default presets
//! - `spec`   : specs/models/options/errors
//! - `util`   : sheet-name and index helpers
//! - `reader` : polars-backed CSV reader
//! - `writer` : rust_xlsxwriter-backed table + chart writer
pub mod conf;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_CHART_Y_AXIS_TITLE, C_SHEET_NAME_OUTPUT, N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL,
    derive_default_chart_styles, derive_default_xlsx_formats, derive_default_xlsx_write_options,
};
pub use reader::{derive_cell_value_from_any_value, read_csv_table, read_csv_tables};
pub use spec::{SpecCellFormat, SpecChartStyle, SpecXlsxReport, SpecXlsxWriteOptions, XlsxIoError};
pub use util::{derive_unique_sheet_name, sanitize_sheet_name};
pub use writer::E1rmXlsxWriter;
