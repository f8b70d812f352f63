//! Chronological output table assembly.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::aggregate::SessionAggregator;
use crate::conf::{TUP_NAMED_CATEGORIES, TUP_OUTPUT_HEADER};
use crate::spec::{EnumExerciseCategory, SpecOutputRow, SpecOutputSlot, SpecOutputTable};
use crate::util::format_provenance;

/// Build one row per distinct date, dates ascending.
///
/// Categories without a lift on a date stay `None` so that downstream charts
/// treat them as gaps rather than zero.
pub fn build_output_table(aggregator: &SessionAggregator) -> SpecOutputTable {
    let mut dict_rows: BTreeMap<NaiveDate, SpecOutputRow> = BTreeMap::new();

    for ((date, category), best) in aggregator.iter() {
        let row = dict_rows.entry(*date).or_insert_with(|| SpecOutputRow {
            date: *date,
            named: Default::default(),
            other: None,
        });

        if *category == EnumExerciseCategory::Other {
            row.other = Some(best.e1rm);
            continue;
        }
        if let Some(n_slot) = TUP_NAMED_CATEGORIES.iter().position(|c| c == category) {
            row.named[n_slot] = Some(SpecOutputSlot {
                e1rm: best.e1rm,
                notes: format_provenance(best.reps, best.weight),
            });
        }
    }

    SpecOutputTable {
        header: TUP_OUTPUT_HEADER.iter().map(ToString::to_string).collect(),
        rows: dict_rows.into_values().collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::build_output_table;
    use crate::aggregate::SessionAggregator;
    use crate::spec::{EnumExerciseCategory, SpecLiftRecord, SpecOutputSlot};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, d).expect("date")
    }

    fn aggregate(records: &[(usize, u32, EnumExerciseCategory, u32, f64)]) -> SessionAggregator {
        let mut aggregator = SessionAggregator::new();
        for (row_idx, d, category, reps, weight) in records {
            aggregator
                .fold(&SpecLiftRecord {
                    sheet_idx: 0,
                    row_idx: *row_idx,
                    date: day(*d),
                    category: *category,
                    reps: *reps,
                    weight: *weight,
                })
                .expect("fold");
        }
        aggregator
    }

    #[test]
    fn build_output_table_sorts_dates_and_keeps_gaps() {
        use EnumExerciseCategory::*;
        let aggregator = aggregate(&[
            (1, 9, Deadlift, 5, 150.0),
            (2, 2, Squat, 8, 60.0),
            (3, 2, Other, 12, 30.0),
            (4, 5, Press, 1, 52.5),
        ]);

        let table = build_output_table(&aggregator);
        assert_eq!(table.width(), 10);
        assert_eq!(table.header[0], "Date");
        assert_eq!(table.header[9], "Other");
        assert_eq!(table.height(), 3);

        let l_dates: Vec<_> = table.rows.iter().map(|row| row.date).collect();
        assert_eq!(l_dates, vec![day(2), day(5), day(9)]);

        let row_first = &table.rows[0];
        assert_eq!(
            row_first.named[0],
            Some(SpecOutputSlot {
                e1rm: 76.0,
                notes: "8@60".to_string()
            })
        );
        assert_eq!(row_first.named[1], None);
        assert_eq!(row_first.named[2], None);
        assert_eq!(row_first.named[3], None);
        assert_eq!(row_first.other, Some(42.0));

        let row_second = &table.rows[1];
        assert_eq!(
            row_second.named[3],
            Some(SpecOutputSlot {
                e1rm: 52.5,
                notes: "1@52.5".to_string()
            })
        );
        assert_eq!(row_second.other, None);

        assert_eq!(table.rows[2].named[2].as_ref().map(|s| s.e1rm), Some(175.0));
    }

    #[test]
    fn build_output_table_empty_aggregation() {
        let table = build_output_table(&SessionAggregator::new());
        assert_eq!(table.height(), 0);
        assert_eq!(table.width(), 10);
    }
}
