//! `liftkit_e1rm` v1:
//! Best-e1RM-per-session aggregation kernel for tabular workout logs.
//!
//! Modules, leaves first:
//! - `conf`      : header vocabulary, category table and default presets
//! - `spec`      : cell/record/output models, options and errors
//! - `util`      : pure cell predicates and formatting helpers
//! - `column`    : header row to column index resolution
//! - `estimate`  : Epley one-rep-max estimator
//! - `filter`    : row predicates and assigned/actual override
//! - `aggregate` : max-fold per (date, category)
//! - `output`    : chronological output table
//! - `report`    : run counters and warnings
//! - `pipeline`  : per-sheet and multi-sheet orchestration
pub mod aggregate;
pub mod column;
pub mod conf;
pub mod estimate;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod spec;
pub mod util;

pub use aggregate::{SessionAggregator, SessionKey};
pub use column::resolve_column_map;
pub use conf::{
    TUP_EXERCISE_CATEGORY_LOOKUP, TUP_NAMED_CATEGORIES, TUP_OUTPUT_HEADER,
    derive_default_column_vocabulary, derive_default_e1rm_options,
};
pub use estimate::estimate_e1rm;
pub use filter::resolve_lift_record;
pub use output::build_output_table;
pub use pipeline::{SpecE1rmRun, process_sheet, process_sheets};
pub use report::{ReportE1rm, ReportE1rmBuilder};
pub use spec::{
    E1rmError, EnumCellValue, EnumExerciseCategory, EnumRowRejection, SpecColumnMap,
    SpecColumnVocabulary, SpecE1rmOptions, SpecLiftRecord, SpecOutputRow, SpecOutputSlot,
    SpecOutputTable, SpecRawTable, SpecSessionBest,
};
