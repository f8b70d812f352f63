//! Header row to semantic column index resolution.

use crate::spec::{E1rmError, SpecColumnMap, SpecColumnVocabulary};

/// Resolve semantic column indices from `header`.
///
/// Matching is exact and case-sensitive. When a header name repeats, the first
/// occurrence wins. Every field except `missed` is required; all absent required
/// names are reported together in [`E1rmError::SchemaMismatch`].
pub fn resolve_column_map(
    sheet_name: &str,
    header: &[String],
    vocabulary: &SpecColumnVocabulary,
) -> Result<SpecColumnMap, E1rmError> {
    let find_col = |c_name: &str| header.iter().position(|c_header| c_header == c_name);

    let l_cols_idx_required: Vec<Option<usize>> = vocabulary
        .required_headers()
        .iter()
        .map(|c_name| find_col(c_name))
        .collect();

    let l_missing: Vec<String> = vocabulary
        .required_headers()
        .iter()
        .zip(&l_cols_idx_required)
        .filter(|(_, n_idx)| n_idx.is_none())
        .map(|(c_name, _)| c_name.to_string())
        .collect();
    if !l_missing.is_empty() {
        return Err(E1rmError::SchemaMismatch {
            sheet: sheet_name.to_string(),
            missing: l_missing,
        });
    }

    let l_idx: Vec<usize> = l_cols_idx_required.into_iter().flatten().collect();
    Ok(SpecColumnMap {
        workout_date: l_idx[0],
        completed: l_idx[1],
        exercise_name: l_idx[2],
        assigned_reps: l_idx[3],
        assigned_weight: l_idx[4],
        actual_reps: l_idx[5],
        actual_weight: l_idx[6],
        missed: find_col(&vocabulary.missed),
    })
}

#[cfg(test)]
mod tests {
    use super::resolve_column_map;
    use crate::spec::{E1rmError, SpecColumnVocabulary};

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn resolve_column_map_handles_arbitrary_order() {
        let l_header = header(&[
            "actual_weight",
            "notes",
            "workout_date",
            "assigned_weight",
            "exercise_name",
            "assigned_exercise_missed",
            "workout_completed",
            "actual_reps",
            "assigned_reps",
        ]);
        let map = resolve_column_map("bloc", &l_header, &SpecColumnVocabulary::default())
            .expect("resolve");

        assert_eq!(map.workout_date, 2);
        assert_eq!(map.completed, 6);
        assert_eq!(map.exercise_name, 4);
        assert_eq!(map.assigned_reps, 8);
        assert_eq!(map.assigned_weight, 3);
        assert_eq!(map.actual_reps, 7);
        assert_eq!(map.actual_weight, 0);
        assert_eq!(map.missed, Some(5));
    }

    #[test]
    fn resolve_column_map_missed_is_optional() {
        let l_header = header(&[
            "workout_date",
            "workout_completed",
            "exercise_name",
            "assigned_reps",
            "assigned_weight",
            "actual_reps",
            "actual_weight",
        ]);
        let map = resolve_column_map("bloc", &l_header, &SpecColumnVocabulary::default())
            .expect("resolve");
        assert_eq!(map.workout_date, 0);
        assert_eq!(map.missed, None);
    }

    #[test]
    fn resolve_column_map_first_occurrence_wins() {
        let l_header = header(&[
            "workout_date",
            "workout_completed",
            "exercise_name",
            "assigned_reps",
            "assigned_weight",
            "actual_reps",
            "actual_weight",
            "workout_date",
        ]);
        let map = resolve_column_map("bloc", &l_header, &SpecColumnVocabulary::default())
            .expect("resolve");
        assert_eq!(map.workout_date, 0);
    }

    #[test]
    fn resolve_column_map_reports_every_missing_field() {
        let l_header = header(&[
            "Workout_Date",
            "workout_completed",
            "exercise_name",
            "assigned_weight",
            "actual_reps",
            "actual_weight",
        ]);
        let err = resolve_column_map("bloc", &l_header, &SpecColumnVocabulary::default())
            .expect_err("schema mismatch");

        assert_eq!(
            err,
            E1rmError::SchemaMismatch {
                sheet: "bloc".to_string(),
                missing: vec!["workout_date".to_string(), "assigned_reps".to_string()],
            }
        );
        assert_eq!(
            err.to_string(),
            "Sheet \"bloc\" is missing required columns: workout_date, assigned_reps"
        );
    }
}
