//! XLSX/CSV constants and default preset factories.

use std::collections::BTreeMap;

use liftkit_e1rm::EnumExerciseCategory;

use crate::spec::{SpecCellFormat, SpecChartStyle, SpecXlsxWriteOptions};

/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Default name of the aggregated output sheet.
pub const C_SHEET_NAME_OUTPUT: &str = "Processed E1RMs";
/// X-axis title of every progress chart.
pub const C_CHART_X_AXIS_TITLE: &str = "Date";
/// Y-axis title of every progress chart.
pub const C_CHART_Y_AXIS_TITLE: &str = "Epley One Rep Max";

/// Rows sampled by the CSV reader for dtype inference.
pub const N_ROWS_SCHEMA_INFER: usize = 10_000;
/// Offset-qualified datetime layouts. The written wall-clock time is kept and
/// the offset dropped, so a session stays on the day its timestamp names.
pub const TUP_TEXT_DATETIME_OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];
/// Text datetime layouts accepted when the CSV parser left a date as text.
pub const TUP_TEXT_DATETIME_FORMATS: [&str; 3] =
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
/// Text date layouts accepted when the CSV parser left a date as text.
pub const TUP_TEXT_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Build default named format presets used by [`crate::writer::E1rmXlsxWriter`].
pub fn derive_default_xlsx_formats() -> BTreeMap<String, SpecCellFormat> {
    let cfg_base_fmt_spec = SpecCellFormat {
        font_name: Some("Arial".to_string()),
        font_size: Some(10),
        align: Some("left".to_string()),
        ..Default::default()
    };

    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert("text".to_string(), cfg_base_fmt_spec.clone());
    dict_fmt.insert(
        "header".to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            align: Some("center".to_string()),
            bottom: Some(1),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        "decimal".to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            num_format: Some("0.##".to_string()),
            align: Some("right".to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        "date".to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            align: Some("center".to_string()),
            ..Default::default()
        }),
    );

    dict_fmt
}

/// Build one progress chart style per named category.
pub fn derive_default_chart_styles() -> Vec<SpecChartStyle> {
    [
        (EnumExerciseCategory::Squat, 0xE53935),
        (EnumExerciseCategory::BenchPress, 0x1E88E5),
        (EnumExerciseCategory::Deadlift, 0x43A047),
        (EnumExerciseCategory::Press, 0x8E24AA),
    ]
    .into_iter()
    .map(|(category, color_rgb)| SpecChartStyle {
        category,
        title: format!("{} Progress", category.label()),
        color_rgb,
    })
    .collect()
}

/// Build default write options.
pub fn derive_default_xlsx_write_options() -> SpecXlsxWriteOptions {
    SpecXlsxWriteOptions::default()
}
