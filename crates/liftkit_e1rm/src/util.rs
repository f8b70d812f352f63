//! Stateless helper utilities shared by the E1RM pipeline stages.

use chrono::NaiveDate;

use crate::conf::TUP_EXERCISE_CATEGORY_LOOKUP;
use crate::spec::{EnumCellValue, EnumExerciseCategory};

static CELL_BLANK: EnumCellValue = EnumCellValue::None;

////////////////////////////////////////////////////////////////////////////////
// #region CellPredicates

/// Spreadsheet-script truthiness: blank, `false`, `0`, `NaN` and `""` are falsy.
pub fn is_truthy(value: &EnumCellValue) -> bool {
    match value {
        EnumCellValue::None => false,
        EnumCellValue::Boolean(val) => *val,
        EnumCellValue::Number(val) => *val != 0.0 && !val.is_nan(),
        EnumCellValue::String(val) => !val.is_empty(),
        EnumCellValue::Date(_) | EnumCellValue::DateTime(_) => true,
    }
}

/// Cell at `col_idx`, treating short rows as blank-padded.
pub fn select_cell(row: &[EnumCellValue], col_idx: usize) -> &EnumCellValue {
    row.get(col_idx).unwrap_or(&CELL_BLANK)
}

/// Calendar day of a date/datetime cell; time of day is dropped.
pub fn derive_calendar_date(value: &EnumCellValue) -> Option<NaiveDate> {
    match value {
        EnumCellValue::Date(val) => Some(*val),
        EnumCellValue::DateTime(val) => Some(val.date()),
        _ => None,
    }
}

/// Positive whole-number repetitions, if the cell holds one.
pub fn derive_positive_reps(value: &EnumCellValue) -> Option<u32> {
    let EnumCellValue::Number(val) = value else {
        return None;
    };
    if !val.is_finite() || *val < 1.0 || val.fract() != 0.0 || *val > u32::MAX as f64 {
        return None;
    }
    Some(*val as u32)
}

/// Positive finite weight, if the cell holds one.
pub fn derive_positive_weight(value: &EnumCellValue) -> Option<f64> {
    match value {
        EnumCellValue::Number(val) if val.is_finite() && *val > 0.0 => Some(*val),
        _ => None,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Classification

/// Map an exercise name to its category; unlisted names fall back to `Other`.
pub fn classify_exercise(value: &EnumCellValue) -> EnumExerciseCategory {
    let EnumCellValue::String(c_name) = value else {
        return EnumExerciseCategory::Other;
    };
    TUP_EXERCISE_CATEGORY_LOOKUP
        .iter()
        .find(|(c_name_known, _)| *c_name_known == c_name.as_str())
        .map_or(EnumExerciseCategory::Other, |(_, category)| *category)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Formatting

/// Provenance label `"{reps}@{weight}"` with the shortest weight text (`8@60`, `3@62.5`).
pub fn format_provenance(reps: u32, weight: f64) -> String {
    format!("{reps}@{weight}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Workers

/// Resolve effective worker count from optional user cap.
pub(crate) fn calculate_worker_limit(num_workers_max: Option<usize>) -> usize {
    let n_cpu = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);

    match num_workers_max {
        Some(n) => n.clamp(1, n_cpu),
        None => n_cpu.clamp(1, 8),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_is_truthy_follows_script_semantics() {
        assert!(!is_truthy(&EnumCellValue::None));
        assert!(!is_truthy(&EnumCellValue::Boolean(false)));
        assert!(!is_truthy(&EnumCellValue::Number(0.0)));
        assert!(!is_truthy(&EnumCellValue::Number(f64::NAN)));
        assert!(!is_truthy(&EnumCellValue::String(String::new())));

        assert!(is_truthy(&EnumCellValue::Boolean(true)));
        assert!(is_truthy(&EnumCellValue::Number(-1.0)));
        assert!(is_truthy(&EnumCellValue::String("FALSE".to_string())));
        assert!(is_truthy(&EnumCellValue::Date(
            NaiveDate::from_ymd_opt(2022, 3, 1).expect("date")
        )));
    }

    #[test]
    fn test_derive_calendar_date_drops_time_of_day() {
        let dt = NaiveDate::from_ymd_opt(2022, 3, 1)
            .expect("date")
            .and_hms_opt(18, 30, 0)
            .expect("time");
        assert_eq!(
            derive_calendar_date(&EnumCellValue::DateTime(dt)),
            NaiveDate::from_ymd_opt(2022, 3, 1)
        );
        assert_eq!(
            derive_calendar_date(&EnumCellValue::String("2022-03-01".to_string())),
            None
        );
    }

    #[test]
    fn test_derive_positive_reps_rejects_fractional_and_non_positive() {
        assert_eq!(derive_positive_reps(&EnumCellValue::Number(5.0)), Some(5));
        assert_eq!(derive_positive_reps(&EnumCellValue::Number(2.5)), None);
        assert_eq!(derive_positive_reps(&EnumCellValue::Number(0.0)), None);
        assert_eq!(derive_positive_reps(&EnumCellValue::Number(-3.0)), None);
        assert_eq!(derive_positive_reps(&EnumCellValue::String("5".to_string())), None);
    }

    #[test]
    fn test_derive_positive_weight() {
        assert_eq!(derive_positive_weight(&EnumCellValue::Number(62.5)), Some(62.5));
        assert_eq!(derive_positive_weight(&EnumCellValue::Number(0.0)), None);
        assert_eq!(derive_positive_weight(&EnumCellValue::Number(f64::INFINITY)), None);
        assert_eq!(derive_positive_weight(&EnumCellValue::None), None);
    }

    #[test]
    fn test_classify_exercise_is_exact_and_total() {
        let name = |s: &str| EnumCellValue::String(s.to_string());
        assert_eq!(classify_exercise(&name("Squat")), EnumExerciseCategory::Squat);
        assert_eq!(
            classify_exercise(&name("Bench Press")),
            EnumExerciseCategory::BenchPress
        );
        assert_eq!(classify_exercise(&name("Deadlift")), EnumExerciseCategory::Deadlift);
        assert_eq!(classify_exercise(&name("Press")), EnumExerciseCategory::Press);
        assert_eq!(classify_exercise(&name("squat")), EnumExerciseCategory::Other);
        assert_eq!(classify_exercise(&name("Lat Pulldown")), EnumExerciseCategory::Other);
        assert_eq!(classify_exercise(&name("")), EnumExerciseCategory::Other);
        assert_eq!(classify_exercise(&EnumCellValue::None), EnumExerciseCategory::Other);
    }

    #[test]
    fn test_format_provenance_uses_shortest_weight_text() {
        assert_eq!(format_provenance(8, 60.0), "8@60");
        assert_eq!(format_provenance(3, 62.5), "3@62.5");
    }

    #[test]
    fn test_calculate_worker_limit_is_at_least_one() {
        assert_eq!(calculate_worker_limit(Some(0)), 1);
        assert!(calculate_worker_limit(None) >= 1);
    }
}
