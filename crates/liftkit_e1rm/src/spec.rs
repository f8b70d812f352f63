//! Shared E1RM models, options and top-level error types.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::conf::derive_default_column_vocabulary;

////////////////////////////////////////////////////////////////////////////////
// #region CellValues

/// One cell as supplied by the tabular host.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Boolean value.
    Boolean(bool),
    /// Numeric value.
    Number(f64),
    /// Text value.
    String(String),
    /// Calendar date without time of day.
    Date(NaiveDate),
    /// Timestamp without timezone.
    DateTime(NaiveDateTime),
}

/// One sheet snapshot: header row plus positional data rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecRawTable {
    /// Sheet name used in reports and errors.
    pub name: String,
    /// Row 0 of the sheet.
    pub header: Vec<String>,
    /// Rows 1..N of the sheet.
    pub rows: Vec<Vec<EnumCellValue>>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnSchema

/// Literal header text for each semantic field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecColumnVocabulary {
    pub workout_date: String,
    pub completed: String,
    pub exercise_name: String,
    pub assigned_reps: String,
    pub assigned_weight: String,
    pub actual_reps: String,
    pub actual_weight: String,
    /// Optional column; sheets without it never mark a set as missed.
    pub missed: String,
}

impl Default for SpecColumnVocabulary {
    fn default() -> Self {
        derive_default_column_vocabulary()
    }
}

impl SpecColumnVocabulary {
    /// Required header names in resolution order.
    pub fn required_headers(&self) -> [&str; 7] {
        [
            &self.workout_date,
            &self.completed,
            &self.exercise_name,
            &self.assigned_reps,
            &self.assigned_weight,
            &self.actual_reps,
            &self.actual_weight,
        ]
    }
}

/// Resolved zero-based column index per semantic field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecColumnMap {
    pub workout_date: usize,
    pub completed: usize,
    pub exercise_name: usize,
    pub assigned_reps: usize,
    pub assigned_weight: usize,
    pub actual_reps: usize,
    pub actual_weight: usize,
    pub missed: Option<usize>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LiftModels

/// Closed exercise classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumExerciseCategory {
    Squat,
    BenchPress,
    Deadlift,
    Press,
    /// Catch-all for every unlisted exercise.
    Other,
}

impl EnumExerciseCategory {
    /// Short display label used in output headers and chart titles.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Squat => "Squat",
            Self::BenchPress => "Bench",
            Self::Deadlift => "Deadlift",
            Self::Press => "Press",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for EnumExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One accepted set after filtering and override resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecLiftRecord {
    /// 0-based position of the source sheet in the run.
    pub sheet_idx: usize,
    /// 1-based source row index (header is row 0).
    pub row_idx: usize,
    /// Calendar date of the session.
    pub date: NaiveDate,
    pub category: EnumExerciseCategory,
    pub reps: u32,
    pub weight: f64,
}

/// Reason a data row does not produce a lift record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumRowRejection {
    /// Date cell is blank/falsy.
    MissingDate,
    /// Workout is not flagged as completed.
    NotCompleted,
    /// No assigned reps; usually a coach comment row.
    NoAssignedReps,
    /// Set flagged as missed.
    MarkedMissed,
    /// Date cell holds something other than a date.
    InvalidDate,
    /// Resolved reps/weight are not positive numbers.
    InvalidLiftValues,
}

impl EnumRowRejection {
    /// Stable snake-case key used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingDate => "missing_date",
            Self::NotCompleted => "not_completed",
            Self::NoAssignedReps => "no_assigned_reps",
            Self::MarkedMissed => "marked_missed",
            Self::InvalidDate => "invalid_date",
            Self::InvalidLiftValues => "invalid_lift_values",
        }
    }
}

impl fmt::Display for EnumRowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best lift of one (date, category) key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecSessionBest {
    pub e1rm: f64,
    /// Literal reps of the set that produced `e1rm`.
    pub reps: u32,
    /// Literal weight of the set that produced `e1rm`.
    pub weight: f64,
    /// Source sheet of the set that produced `e1rm`.
    pub sheet_idx: usize,
    /// Source row of the set that produced `e1rm`.
    pub row_idx: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OutputModels

/// Value plus provenance text for one named category.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecOutputSlot {
    pub e1rm: f64,
    /// Display label such as `8@60`.
    pub notes: String,
}

/// One output line: a date and its best lifts.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecOutputRow {
    pub date: NaiveDate,
    /// Squat, Bench, Deadlift, Press in that order.
    pub named: [Option<SpecOutputSlot>; 4],
    /// Other carries the value only.
    pub other: Option<f64>,
}

/// Final chronological table handed to the sink.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecOutputTable {
    pub header: Vec<String>,
    pub rows: Vec<SpecOutputRow>,
}

impl SpecOutputTable {
    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.header.len()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OptionsAndErrors

/// Input options for `process_sheet` / `process_sheets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecE1rmOptions {
    /// Header vocabulary used by the column resolver.
    pub vocabulary: SpecColumnVocabulary,
    /// Maximum worker threads for row filtering and estimation.
    pub num_workers_max: Option<usize>,
}

impl Default for SpecE1rmOptions {
    fn default() -> Self {
        Self {
            vocabulary: SpecColumnVocabulary::default(),
            num_workers_max: None,
        }
    }
}

/// "Run failed" errors. Row rejections are not errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum E1rmError {
    /// Sheet has no header row.
    #[error("Sheet {sheet:?} is empty: no header row.")]
    EmptyTable { sheet: String },
    /// One or more required headers are absent.
    #[error("Sheet {sheet:?} is missing required columns: {}", .missing.join(", "))]
    SchemaMismatch { sheet: String, missing: Vec<String> },
    /// Non-positive reps/weight reached the estimator.
    #[error("Invalid lift input: reps={reps}, weight={weight}.")]
    InvalidLiftInput { reps: u32, weight: f64 },
    /// No row across the input produced a lift record.
    #[error("No data found: no completed lifts in the input.")]
    NoDataFound,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
