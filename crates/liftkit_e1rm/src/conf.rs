//! E1RM constants and default preset factories.

use crate::spec::{EnumExerciseCategory, SpecColumnVocabulary, SpecE1rmOptions};

/// Header text of the workout date column in BLOC exports.
pub const C_HEADER_WORKOUT_DATE: &str = "workout_date";
/// Header text of the workout-completed flag column.
pub const C_HEADER_COMPLETED: &str = "workout_completed";
/// Header text of the exercise name column.
pub const C_HEADER_EXERCISE_NAME: &str = "exercise_name";
/// Header text of the coach-assigned repetitions column.
pub const C_HEADER_ASSIGNED_REPS: &str = "assigned_reps";
/// Header text of the coach-assigned weight column.
pub const C_HEADER_ASSIGNED_WEIGHT: &str = "assigned_weight";
/// Header text of the performed repetitions column.
pub const C_HEADER_ACTUAL_REPS: &str = "actual_reps";
/// Header text of the performed weight column.
pub const C_HEADER_ACTUAL_WEIGHT: &str = "actual_weight";
/// Header text of the optional missed-set flag column.
pub const C_HEADER_MISSED: &str = "assigned_exercise_missed";

/// Epley divisor: `weight * (1 + reps / N_EPLEY_REPS_DIVISOR)`.
pub const N_EPLEY_REPS_DIVISOR: f64 = 30.0;

/// Exercise names with a dedicated output column. Everything else is `Other`.
pub const TUP_EXERCISE_CATEGORY_LOOKUP: [(&str, EnumExerciseCategory); 4] = [
    ("Squat", EnumExerciseCategory::Squat),
    ("Bench Press", EnumExerciseCategory::BenchPress),
    ("Deadlift", EnumExerciseCategory::Deadlift),
    ("Press", EnumExerciseCategory::Press),
];

/// Named categories in output column order.
pub const TUP_NAMED_CATEGORIES: [EnumExerciseCategory; 4] = [
    EnumExerciseCategory::Squat,
    EnumExerciseCategory::BenchPress,
    EnumExerciseCategory::Deadlift,
    EnumExerciseCategory::Press,
];

/// Fixed output header row.
pub const TUP_OUTPUT_HEADER: [&str; 10] = [
    "Date",
    "Squat",
    "Squat Notes",
    "Bench",
    "Bench Notes",
    "Deadlift",
    "Deadlift Notes",
    "Press",
    "Press Notes",
    "Other",
];

/// Build the BLOC export header vocabulary.
pub fn derive_default_column_vocabulary() -> SpecColumnVocabulary {
    SpecColumnVocabulary {
        workout_date: C_HEADER_WORKOUT_DATE.to_string(),
        completed: C_HEADER_COMPLETED.to_string(),
        exercise_name: C_HEADER_EXERCISE_NAME.to_string(),
        assigned_reps: C_HEADER_ASSIGNED_REPS.to_string(),
        assigned_weight: C_HEADER_ASSIGNED_WEIGHT.to_string(),
        actual_reps: C_HEADER_ACTUAL_REPS.to_string(),
        actual_weight: C_HEADER_ACTUAL_WEIGHT.to_string(),
        missed: C_HEADER_MISSED.to_string(),
    }
}

/// Build default run options.
pub fn derive_default_e1rm_options() -> SpecE1rmOptions {
    SpecE1rmOptions::default()
}
