//! XLSX writer that emits the aggregated e1RM table plus progress charts.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use liftkit_e1rm::{SpecOutputRow, SpecOutputTable};
use rust_xlsxwriter::{
    Chart, ChartDataLabel, ChartEmptyCells, ChartFormat, ChartLine, ChartMarker, ChartMarkerType,
    ChartType, Color, ExcelDateTime, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
};
use tracing::{debug, info};

use crate::conf::{
    C_CHART_X_AXIS_TITLE, C_CHART_Y_AXIS_TITLE, derive_default_chart_styles,
    derive_default_xlsx_formats,
};
use crate::spec::{
    SpecCellFormat, SpecChartStyle, SpecXlsxReport, SpecXlsxWriteOptions, XlsxIoError,
};
use crate::util::{cast_col_num, cast_row_num, derive_unique_sheet_name, sanitize_sheet_name};

/// Stateful workbook writer for aggregated e1RM tables.
pub struct E1rmXlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    fmt_text: SpecCellFormat,
    fmt_decimal: SpecCellFormat,
    fmt_date: SpecCellFormat,
    fmt_header: SpecCellFormat,
    l_chart_styles: Vec<SpecChartStyle>,
    write_options: SpecXlsxWriteOptions,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
    if_closed: bool,
}

impl E1rmXlsxWriter {
    /// Create writer bound to output path and format/options presets.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(
        path_file_out: PathBuf,
        fmt_text: SpecCellFormat,
        fmt_decimal: SpecCellFormat,
        fmt_date: SpecCellFormat,
        fmt_header: SpecCellFormat,
        l_chart_styles: Vec<SpecChartStyle>,
        write_options: SpecXlsxWriteOptions,
    ) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            fmt_text,
            fmt_decimal,
            fmt_date,
            fmt_header,
            l_chart_styles,
            write_options,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Create writer with the default format presets and chart styles.
    pub fn with_defaults(path_file_out: PathBuf, write_options: SpecXlsxWriteOptions) -> Self {
        let mut dict_fmt = derive_default_xlsx_formats();
        let mut take_fmt = |key: &str| dict_fmt.remove(key).unwrap_or_default();
        let fmt_text = take_fmt("text");
        let fmt_decimal = take_fmt("decimal");
        let fmt_date = take_fmt("date");
        let fmt_header = take_fmt("header");
        Self::new(
            path_file_out,
            fmt_text,
            fmt_decimal,
            fmt_date,
            fmt_header,
            derive_default_chart_styles(),
            write_options,
        )
    }

    /// Return output file path as string.
    pub fn file_out(&self) -> String {
        self.path_file_out.to_string_lossy().to_string()
    }

    /// Return immutable snapshot of per-call write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxIoError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        info!("Saved workbook {}", self.path_file_out.display());
        Ok(())
    }

    /// Write the output table to its own sheet, then one chartsheet per named
    /// category that has at least one value.
    pub fn write_output_table(&mut self, table: &SpecOutputTable) -> Result<(), XlsxIoError> {
        if self.if_closed {
            return Err(XlsxIoError::Closed);
        }
        if table.rows.is_empty() {
            return Err(XlsxIoError::EmptyOutput);
        }

        let mut report = SpecXlsxReport::default();
        let sheet_name = derive_unique_sheet_name(
            &mut self.set_sheet_names_existing,
            &sanitize_sheet_name(&self.write_options.sheet_name_output, "_"),
        );

        let fmt_header = derive_rust_xlsx_format(&self.fmt_header);
        let fmt_text = derive_rust_xlsx_format(&self.fmt_text);
        let fmt_decimal = derive_rust_xlsx_format(&self.fmt_decimal);
        let fmt_date = derive_rust_xlsx_format(&self.fmt_date.with_(SpecCellFormat {
            num_format: Some(self.write_options.fmt_date_num.clone()),
            ..Default::default()
        }));

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name)?;
        write_header(worksheet, &table.header, &fmt_header)?;
        for (n_idx, row) in table.rows.iter().enumerate() {
            write_body_row(worksheet, n_idx + 1, row, &fmt_date, &fmt_decimal, &fmt_text)?;
        }
        for (col_idx, c_header) in table.header.iter().enumerate() {
            let n_width = usize::max(
                self.write_options.width_cell_min,
                c_header.chars().count() + self.write_options.width_cell_padding,
            );
            worksheet.set_column_width(cast_col_num(col_idx)?, n_width as f64)?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        report.sheet_name = sheet_name.clone();
        report.cnt_rows = table.rows.len();
        debug!("Wrote {} rows to sheet {:?}", report.cnt_rows, sheet_name);

        if self.write_options.if_write_charts {
            self.write_progress_charts(table, &sheet_name, &mut report)?;
        }

        self.l_reports.push(report);
        Ok(())
    }

    fn write_progress_charts(
        &mut self,
        table: &SpecOutputTable,
        sheet_name_data: &str,
        report: &mut SpecXlsxReport,
    ) -> Result<(), XlsxIoError> {
        let dict_value_cols = derive_value_column_indices(table);

        for style in self.l_chart_styles.clone() {
            let Some(&col_idx) = dict_value_cols.get(style.category.label()) else {
                report.warn(format!(
                    "No output column for {}; chart skipped.",
                    style.category.label()
                ));
                continue;
            };
            let n_slot = (col_idx - 1) / 2;
            if table
                .rows
                .iter()
                .all(|row| row.named.get(n_slot).is_none_or(Option::is_none))
            {
                report.warn(format!("No {} data; chart skipped.", style.category.label()));
                continue;
            }

            let chart = derive_progress_chart(
                sheet_name_data,
                table.rows.len(),
                col_idx,
                &style,
                &self.write_options,
            )?;
            let chart_sheet_name = derive_unique_sheet_name(
                &mut self.set_sheet_names_existing,
                &sanitize_sheet_name(&style.title, "_"),
            );
            let chartsheet = self.workbook.add_chartsheet();
            chartsheet.set_name(&chart_sheet_name)?;
            chartsheet.insert_chart(0, 0, &chart)?;
            report.chart_sheets.push(chart_sheet_name);
        }

        Ok(())
    }
}

/// Map each named category label to its value column index in `table.header`.
fn derive_value_column_indices(table: &SpecOutputTable) -> BTreeMap<&str, usize> {
    let mut dict_cols = BTreeMap::new();
    for (col_idx, c_header) in table.header.iter().enumerate() {
        // Layout is Date, then (value, notes) pairs; values sit at odd indices.
        if col_idx % 2 == 1 && col_idx + 1 < table.header.len() {
            dict_cols.entry(c_header.as_str()).or_insert(col_idx);
        }
    }
    dict_cols
}

fn derive_progress_chart(
    sheet_name_data: &str,
    n_rows_body: usize,
    col_idx_value: usize,
    style: &SpecChartStyle,
    write_options: &SpecXlsxWriteOptions,
) -> Result<Chart, XlsxIoError> {
    let n_row_last = cast_row_num(n_rows_body)?;
    let n_col_value = cast_col_num(col_idx_value)?;

    let mut chart = Chart::new(ChartType::Line);
    chart.title().set_name(style.title.as_str());
    chart.x_axis().set_name(C_CHART_X_AXIS_TITLE);
    chart.y_axis().set_name(C_CHART_Y_AXIS_TITLE);
    chart.legend().set_hidden();
    chart.show_empty_cells_as(ChartEmptyCells::Connected);
    chart
        .set_width(write_options.chart_width)
        .set_height(write_options.chart_height);

    chart
        .add_series()
        .set_name(style.category.label())
        .set_categories((sheet_name_data, 1, 0, n_row_last, 0))
        .set_values((sheet_name_data, 1, n_col_value, n_row_last, n_col_value))
        .set_smooth(true)
        .set_marker(ChartMarker::new().set_type(ChartMarkerType::Diamond))
        .set_format(
            ChartFormat::new().set_line(ChartLine::new().set_color(Color::RGB(style.color_rgb))),
        )
        .set_data_label(ChartDataLabel::new().show_value());

    Ok(chart)
}

fn write_header(
    worksheet: &mut Worksheet,
    header: &[String],
    fmt_header: &Format,
) -> Result<(), XlsxIoError> {
    for (col_idx, c_header) in header.iter().enumerate() {
        worksheet.write_string_with_format(0, cast_col_num(col_idx)?, c_header, fmt_header)?;
    }
    Ok(())
}

fn write_body_row(
    worksheet: &mut Worksheet,
    row_idx: usize,
    row: &SpecOutputRow,
    fmt_date: &Format,
    fmt_decimal: &Format,
    fmt_text: &Format,
) -> Result<(), XlsxIoError> {
    let n_row = cast_row_num(row_idx)?;
    worksheet.write_datetime_with_format(n_row, 0, &derive_excel_date(row.date)?, fmt_date)?;

    let mut col_idx = 1usize;
    for slot in &row.named {
        let n_col_value = cast_col_num(col_idx)?;
        let n_col_notes = cast_col_num(col_idx + 1)?;
        match slot {
            Some(slot) => {
                worksheet.write_number_with_format(n_row, n_col_value, slot.e1rm, fmt_decimal)?;
                worksheet.write_string_with_format(n_row, n_col_notes, &slot.notes, fmt_text)?;
            }
            None => {
                worksheet.write_blank(n_row, n_col_value, fmt_decimal)?;
                worksheet.write_blank(n_row, n_col_notes, fmt_text)?;
            }
        }
        col_idx += 2;
    }

    let n_col_other = cast_col_num(col_idx)?;
    match row.other {
        Some(val) => {
            worksheet.write_number_with_format(n_row, n_col_other, val, fmt_decimal)?;
        }
        None => {
            worksheet.write_blank(n_row, n_col_other, fmt_decimal)?;
        }
    }
    Ok(())
}

fn derive_excel_date(date: NaiveDate) -> Result<ExcelDateTime, XlsxIoError> {
    let n_year = u16::try_from(date.year()).map_err(|_| XlsxIoError::IndexOverflow {
        axis: "year",
        value: date.year().unsigned_abs() as usize,
    })?;
    Ok(ExcelDateTime::from_ymd(
        n_year,
        date.month() as u8,
        date.day() as u8,
    )?)
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if let Some(val) = spec.bottom {
        format = format.set_border_bottom(derive_format_border(val));
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use chrono::NaiveDate;
    use liftkit_e1rm::{
        EnumExerciseCategory, SessionAggregator, SpecLiftRecord, SpecOutputTable,
        build_output_table,
    };

    use super::{E1rmXlsxWriter, derive_value_column_indices};
    use crate::spec::{SpecXlsxWriteOptions, XlsxIoError};

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new(tag: &str) -> Self {
            let n = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos();
            let path = std::env::temp_dir().join(format!("liftkit_writer_test_{tag}_{n}"));
            std::fs::create_dir_all(&path).expect("create test dir");
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    fn sample_table() -> SpecOutputTable {
        use EnumExerciseCategory::*;
        let mut aggregator = SessionAggregator::new();
        let l_records = [
            (1, 1, Squat, 5, 100.0),
            (2, 1, BenchPress, 8, 60.0),
            (3, 3, Squat, 3, 110.0),
            (4, 3, Other, 10, 40.0),
            (5, 5, Deadlift, 5, 140.0),
        ];
        for (row_idx, d, category, reps, weight) in l_records {
            aggregator
                .fold(&SpecLiftRecord {
                    sheet_idx: 0,
                    row_idx,
                    date: NaiveDate::from_ymd_opt(2022, 3, d).expect("date"),
                    category,
                    reps,
                    weight,
                })
                .expect("fold");
        }
        build_output_table(&aggregator)
    }

    #[test]
    fn write_output_table_with_charts() {
        let tmp = TestDir::new("charts");
        let path = tmp.path().join("out.xlsx");
        let mut writer =
            E1rmXlsxWriter::with_defaults(path.clone(), SpecXlsxWriteOptions::default());

        writer.write_output_table(&sample_table()).expect("write");
        writer.close().expect("close");
        writer.close().expect("close twice");

        assert!(path.exists());
        let l_reports = writer.report();
        assert_eq!(l_reports.len(), 1);
        let report = &l_reports[0];
        assert_eq!(report.sheet_name, "Processed E1RMs");
        assert_eq!(report.cnt_rows, 3);
        assert_eq!(
            report.chart_sheets,
            vec![
                "Squat Progress".to_string(),
                "Bench Progress".to_string(),
                "Deadlift Progress".to_string()
            ]
        );
        assert_eq!(report.warnings, vec!["No Press data; chart skipped.".to_string()]);
        assert_eq!(writer.file_out(), path.to_string_lossy());
    }

    #[test]
    fn write_output_table_without_charts_and_dedup_names() {
        let tmp = TestDir::new("plain");
        let path = tmp.path().join("out.xlsx");
        let options = SpecXlsxWriteOptions {
            sheet_name_output: "E1RM: [all]".to_string(),
            if_write_charts: false,
            ..Default::default()
        };
        let mut writer = E1rmXlsxWriter::with_defaults(path.clone(), options);
        let table = sample_table();

        writer.write_output_table(&table).expect("first");
        writer.write_output_table(&table).expect("second");
        writer.close().expect("close");

        let l_names: Vec<_> = writer.report().into_iter().map(|r| r.sheet_name).collect();
        assert_eq!(l_names, vec!["E1RM_ _all_".to_string(), "E1RM_ _all___2".to_string()]);
        assert!(writer.report().iter().all(|r| r.chart_sheets.is_empty()));
        assert!(path.exists());
    }

    #[test]
    fn write_after_close_fails() {
        let tmp = TestDir::new("closed");
        let mut writer = E1rmXlsxWriter::with_defaults(
            tmp.path().join("out.xlsx"),
            SpecXlsxWriteOptions::default(),
        );
        writer.write_output_table(&sample_table()).expect("write");
        writer.close().expect("close");

        let err = writer.write_output_table(&sample_table()).expect_err("closed");
        assert!(matches!(err, XlsxIoError::Closed));
    }

    #[test]
    fn write_empty_table_fails() {
        let tmp = TestDir::new("empty");
        let mut writer = E1rmXlsxWriter::with_defaults(
            tmp.path().join("out.xlsx"),
            SpecXlsxWriteOptions::default(),
        );
        let table = build_output_table(&SessionAggregator::new());
        let err = writer.write_output_table(&table).expect_err("empty");
        assert!(matches!(err, XlsxIoError::EmptyOutput));
    }

    #[test]
    fn derive_value_column_indices_follows_header_layout() {
        let table = sample_table();
        let dict_cols = derive_value_column_indices(&table);
        assert_eq!(dict_cols.get("Squat"), Some(&1));
        assert_eq!(dict_cols.get("Bench"), Some(&3));
        assert_eq!(dict_cols.get("Deadlift"), Some(&5));
        assert_eq!(dict_cols.get("Press"), Some(&7));
        assert_eq!(dict_cols.get("Other"), None);
    }
}
