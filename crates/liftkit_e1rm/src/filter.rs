//! Row validity predicates and assigned/actual override resolution.

use crate::spec::{EnumCellValue, EnumRowRejection, SpecColumnMap, SpecLiftRecord};
use crate::util::{
    classify_exercise, derive_calendar_date, derive_positive_reps, derive_positive_weight,
    is_truthy, select_cell,
};

/// Turn one data row into a lift record or the first matching rejection.
///
/// Predicates run in this order:
/// 1. blank date -> [`EnumRowRejection::MissingDate`]
/// 2. workout not completed -> [`EnumRowRejection::NotCompleted`]
/// 3. no assigned reps -> [`EnumRowRejection::NoAssignedReps`]
/// 4. missed flag set -> [`EnumRowRejection::MarkedMissed`]
/// 5. date cell is not a date -> [`EnumRowRejection::InvalidDate`]
/// 6. reps/weight not positive -> [`EnumRowRejection::InvalidLiftValues`]
///
/// Actual reps/weight replace the assigned pair only when both are present.
/// `sheet_idx` and `row_idx` locate the row for tie-breaking and diagnostics.
pub fn resolve_lift_record(
    row: &[EnumCellValue],
    sheet_idx: usize,
    row_idx: usize,
    column_map: &SpecColumnMap,
) -> Result<SpecLiftRecord, EnumRowRejection> {
    let cell_date = select_cell(row, column_map.workout_date);
    if !is_truthy(cell_date) {
        return Err(EnumRowRejection::MissingDate);
    }
    if !is_truthy(select_cell(row, column_map.completed)) {
        return Err(EnumRowRejection::NotCompleted);
    }
    let cell_assigned_reps = select_cell(row, column_map.assigned_reps);
    if !is_truthy(cell_assigned_reps) {
        return Err(EnumRowRejection::NoAssignedReps);
    }
    if column_map
        .missed
        .is_some_and(|n_idx| is_truthy(select_cell(row, n_idx)))
    {
        return Err(EnumRowRejection::MarkedMissed);
    }
    let Some(date) = derive_calendar_date(cell_date) else {
        return Err(EnumRowRejection::InvalidDate);
    };

    let cell_actual_reps = select_cell(row, column_map.actual_reps);
    let cell_actual_weight = select_cell(row, column_map.actual_weight);
    let (cell_reps, cell_weight) = if is_truthy(cell_actual_reps) && is_truthy(cell_actual_weight)
    {
        (cell_actual_reps, cell_actual_weight)
    } else {
        (
            cell_assigned_reps,
            select_cell(row, column_map.assigned_weight),
        )
    };

    let (Some(reps), Some(weight)) = (
        derive_positive_reps(cell_reps),
        derive_positive_weight(cell_weight),
    ) else {
        return Err(EnumRowRejection::InvalidLiftValues);
    };

    Ok(SpecLiftRecord {
        sheet_idx,
        row_idx,
        date,
        category: classify_exercise(select_cell(row, column_map.exercise_name)),
        reps,
        weight,
    })
}
