//! Best-e1RM-per-session reduction.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::NaiveDate;

use crate::estimate::estimate_e1rm;
use crate::spec::{E1rmError, EnumExerciseCategory, SpecLiftRecord, SpecSessionBest};

/// Session key: calendar date plus exercise category.
pub type SessionKey = (NaiveDate, EnumExerciseCategory);

/// Running max-fold of lift records keyed by (date, category).
///
/// A stored best is replaced only by a strictly larger e1RM. On an exact tie the
/// record from the earlier source position is kept, comparing sheet first and
/// row second. The result therefore does not depend on the order records (or
/// partial aggregations) are folded in, and folding a record twice is a no-op.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionAggregator {
    dict_best: BTreeMap<SessionKey, SpecSessionBest>,
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate the record's e1RM and fold it into its session.
    pub fn fold(&mut self, record: &SpecLiftRecord) -> Result<(), E1rmError> {
        let e1rm = estimate_e1rm(record.reps, record.weight)?;
        self.offer(
            (record.date, record.category),
            SpecSessionBest {
                e1rm,
                reps: record.reps,
                weight: record.weight,
                sheet_idx: record.sheet_idx,
                row_idx: record.row_idx,
            },
        );
        Ok(())
    }

    /// Fold every record of `records`, stopping at the first estimator failure.
    pub fn fold_all<'a, I>(&mut self, records: I) -> Result<(), E1rmError>
    where
        I: IntoIterator<Item = &'a SpecLiftRecord>,
    {
        for record in records {
            self.fold(record)?;
        }
        Ok(())
    }

    /// Merge another partial aggregation using the same max-by-key rule.
    pub fn merge(&mut self, other: SessionAggregator) {
        for (key, best) in other.dict_best {
            self.offer(key, best);
        }
    }

    fn offer(&mut self, key: SessionKey, candidate: SpecSessionBest) {
        match self.dict_best.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if should_replace(slot.get(), &candidate) {
                    slot.insert(candidate);
                }
            }
        }
    }

    /// Best lift for one session, if any.
    pub fn get(&self, date: NaiveDate, category: EnumExerciseCategory) -> Option<&SpecSessionBest> {
        self.dict_best.get(&(date, category))
    }

    /// Number of (date, category) sessions.
    pub fn len(&self) -> usize {
        self.dict_best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict_best.is_empty()
    }

    /// Sessions in (date, category) order.
    pub fn iter(&self) -> impl Iterator<Item = (&SessionKey, &SpecSessionBest)> {
        self.dict_best.iter()
    }

    /// Distinct dates in ascending order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut l_dates: Vec<NaiveDate> = self.dict_best.keys().map(|(date, _)| *date).collect();
        l_dates.dedup();
        l_dates
    }
}

fn should_replace(current: &SpecSessionBest, candidate: &SpecSessionBest) -> bool {
    candidate.e1rm > current.e1rm
        || (candidate.e1rm == current.e1rm
            && (candidate.sheet_idx, candidate.row_idx) < (current.sheet_idx, current.row_idx))
}
