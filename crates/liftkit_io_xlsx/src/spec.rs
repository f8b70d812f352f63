//! Shared XLSX/CSV specification models.

use std::path::PathBuf;

use liftkit_e1rm::EnumExerciseCategory;
use rust_xlsxwriter::XlsxError;

use crate::conf::C_SHEET_NAME_OUTPUT;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Bottom border override.
    pub bottom: Option<i64>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color.
    pub bg_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            align: other.align.clone().or_else(|| self.align.clone()),
            border: other.border.or(self.border),
            bottom: other.bottom.or(self.bottom),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ChartSpecification

/// Look of one category progress chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecChartStyle {
    /// Category plotted by the chart.
    pub category: EnumExerciseCategory,
    /// Chart title, also used as the chartsheet name.
    pub title: String,
    /// Series line color as `0xRRGGBB`.
    pub color_rgb: u32,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Writer-wide options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxWriteOptions {
    /// Name of the aggregated output sheet.
    pub sheet_name_output: String,
    /// Emit one progress chartsheet per named category.
    pub if_write_charts: bool,
    /// Chart width in pixels.
    pub chart_width: u32,
    /// Chart height in pixels.
    pub chart_height: u32,
    /// Number format applied to the date column.
    pub fmt_date_num: String,
    /// Minimum column width.
    pub width_cell_min: usize,
    /// Width padding added after header-based inference.
    pub width_cell_padding: usize,
}

impl Default for SpecXlsxWriteOptions {
    fn default() -> Self {
        Self {
            sheet_name_output: C_SHEET_NAME_OUTPUT.to_string(),
            if_write_charts: true,
            chart_width: 1000,
            chart_height: 600,
            fmt_date_num: "yyyy-mm-dd".to_string(),
            width_cell_min: 10,
            width_cell_padding: 2,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Data sheet written by the call.
    pub sheet_name: String,
    /// Chartsheets written by the call, in category order.
    pub chart_sheets: Vec<String>,
    /// Body rows written (header excluded).
    pub cnt_rows: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failures at the CSV/XLSX boundary.
#[derive(Debug, thiserror::Error)]
pub enum XlsxIoError {
    #[error("Failed to read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("xlsx write error: {0}")]
    Write(#[from] XlsxError),

    #[error("{axis} index overflow: {value}")]
    IndexOverflow { axis: &'static str, value: usize },

    #[error("Output table has no rows; nothing to write.")]
    EmptyOutput,

    #[error("Writer is closed; cannot write after close().")]
    Closed,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
