//! CSV reader that snapshots a workout-log export into a raw table.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use liftkit_e1rm::{EnumCellValue, SpecRawTable};
use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, SerReader, TimeUnit};
use tracing::debug;

use crate::conf::{
    N_ROWS_SCHEMA_INFER, TUP_TEXT_DATE_FORMATS, TUP_TEXT_DATETIME_FORMATS,
    TUP_TEXT_DATETIME_OFFSET_FORMATS,
};
use crate::spec::XlsxIoError;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const N_DAYS_CE_TO_UNIX_EPOCH: i32 = 719_163;

/// Read one CSV file into a [`SpecRawTable`] named after the file stem.
///
/// Row 0 of the file is the header. A zero-byte file yields a table without a
/// header, which the pipeline reports as an empty table.
///
/// Temporal columns are read as text and coerced here rather than by polars, which
/// would normalize offset timestamps to UTC and move late sets onto the next day.
pub fn read_csv_table(path_file_in: &Path) -> Result<SpecRawTable, XlsxIoError> {
    let name = path_file_in
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let derive_read_error = |message: String| XlsxIoError::Read {
        path: path_file_in.to_path_buf(),
        message,
    };

    let metadata =
        std::fs::metadata(path_file_in).map_err(|err| derive_read_error(err.to_string()))?;
    if metadata.len() == 0 {
        return Ok(SpecRawTable {
            name,
            ..Default::default()
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(N_ROWS_SCHEMA_INFER))
        .map_parse_options(|opts| opts.with_try_parse_dates(false))
        .try_into_reader_with_file_path(Some(path_file_in.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|err| derive_read_error(err.to_string()))?;

    let table = derive_raw_table_from_dataframe(&df, name)
        .map_err(|err| derive_read_error(err.to_string()))?;
    debug!(
        "Read {} rows x {} columns from {}",
        table.rows.len(),
        table.header.len(),
        path_file_in.display()
    );
    Ok(table)
}

/// Read several CSV files, stopping at the first failure.
pub fn read_csv_tables(paths_file_in: &[PathBuf]) -> Result<Vec<SpecRawTable>, XlsxIoError> {
    paths_file_in
        .iter()
        .map(|path| read_csv_table(path))
        .collect()
}

fn derive_raw_table_from_dataframe(
    df: &DataFrame,
    name: String,
) -> polars::prelude::PolarsResult<SpecRawTable> {
    let header: Vec<String> = df
        .get_column_names_str()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let l_cols = df.get_columns();

    let mut rows = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let mut l_cells = Vec::with_capacity(l_cols.len());
        for col in l_cols {
            l_cells.push(derive_cell_value_from_any_value(col.get(row_idx)?));
        }
        rows.push(l_cells);
    }

    Ok(SpecRawTable { name, header, rows })
}

/// Convert one polars value into the host-neutral cell kind.
pub fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::Boolean(val) => EnumCellValue::Boolean(val),
        AnyValue::String(val) => derive_cell_value_from_text(val),
        AnyValue::StringOwned(val) => derive_cell_value_from_text(val.as_str()),
        AnyValue::UInt8(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt16(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int8(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int16(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float64(val) => EnumCellValue::Number(val),
        AnyValue::Date(n_days) => derive_date_from_epoch_days(n_days)
            .map(EnumCellValue::Date)
            .unwrap_or(EnumCellValue::None),
        AnyValue::Datetime(val, time_unit, _) => derive_datetime_from_epoch(val, time_unit)
            .map(EnumCellValue::DateTime)
            .unwrap_or(EnumCellValue::None),
        AnyValue::DatetimeOwned(val, time_unit, _) => derive_datetime_from_epoch(val, time_unit)
            .map(EnumCellValue::DateTime)
            .unwrap_or(EnumCellValue::None),
        _ => EnumCellValue::String(value.to_string()),
    }
}

/// Coerce text the way a spreadsheet import does: booleans, finite numbers and
/// ISO-like dates become typed cells, everything else stays text.
fn derive_cell_value_from_text(txt: &str) -> EnumCellValue {
    let c_trimmed = txt.trim();
    if c_trimmed.eq_ignore_ascii_case("true") {
        return EnumCellValue::Boolean(true);
    }
    if c_trimmed.eq_ignore_ascii_case("false") {
        return EnumCellValue::Boolean(false);
    }
    if !c_trimmed.is_empty()
        && let Ok(val) = c_trimmed.parse::<f64>()
        && val.is_finite()
    {
        return EnumCellValue::Number(val);
    }
    if let Ok(val) = DateTime::parse_from_rfc3339(c_trimmed) {
        return EnumCellValue::DateTime(val.naive_local());
    }
    for c_fmt in TUP_TEXT_DATETIME_OFFSET_FORMATS {
        if let Ok(val) = DateTime::parse_from_str(c_trimmed, c_fmt) {
            return EnumCellValue::DateTime(val.naive_local());
        }
    }
    for c_fmt in TUP_TEXT_DATETIME_FORMATS {
        if let Ok(val) = NaiveDateTime::parse_from_str(c_trimmed, c_fmt) {
            return EnumCellValue::DateTime(val);
        }
    }
    for c_fmt in TUP_TEXT_DATE_FORMATS {
        if let Ok(val) = NaiveDate::parse_from_str(c_trimmed, c_fmt) {
            return EnumCellValue::Date(val);
        }
    }
    EnumCellValue::String(txt.to_string())
}

fn derive_date_from_epoch_days(n_days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(n_days.checked_add(N_DAYS_CE_TO_UNIX_EPOCH)?)
}

fn derive_datetime_from_epoch(value: i64, time_unit: TimeUnit) -> Option<NaiveDateTime> {
    let dt = match time_unit {
        TimeUnit::Nanoseconds => Some(DateTime::from_timestamp_nanos(value)),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value),
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value),
    }?;
    Some(dt.naive_utc())
}
