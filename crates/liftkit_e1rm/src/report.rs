//! E1RM run report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use crate::spec::EnumRowRejection;

/// Aggregate counters and diagnostics for one aggregation run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReportE1rm {
    /// Sheets offered to the run.
    pub cnt_sheets: u64,
    /// Sheets skipped because their schema did not resolve.
    pub cnt_sheets_skipped: u64,
    /// Data rows inspected (header rows excluded).
    pub cnt_scanned: u64,
    /// Rows that produced a lift record.
    pub cnt_accepted: u64,
    /// Rows rejected by a validity predicate.
    pub cnt_rejected: u64,
    /// Distinct dates in the output.
    pub cnt_dates: u64,
    /// Distinct (date, category) sessions in the output.
    pub cnt_sessions: u64,
    /// Rejection count per reason.
    pub rejections: BTreeMap<EnumRowRejection, u64>,
    /// Non-fatal warnings collected during the run.
    pub warnings: Vec<String>,
}

impl ReportE1rm {
    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Rejection count for one reason.
    pub fn rejected_by(&self, reason: EnumRowRejection) -> u64 {
        self.rejections.get(&reason).copied().unwrap_or(0)
    }

    /// Machine-readable counters, including one `rejected_<reason>` key per reason seen.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_sheets".to_string(), self.cnt_sheets);
        dict_counts.insert("cnt_sheets_skipped".to_string(), self.cnt_sheets_skipped);
        dict_counts.insert("cnt_scanned".to_string(), self.cnt_scanned);
        dict_counts.insert("cnt_accepted".to_string(), self.cnt_accepted);
        dict_counts.insert("cnt_rejected".to_string(), self.cnt_rejected);
        dict_counts.insert("cnt_dates".to_string(), self.cnt_dates);
        dict_counts.insert("cnt_sessions".to_string(), self.cnt_sessions);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        for (reason, cnt) in &self.rejections {
            dict_counts.insert(format!("rejected_{}", reason.as_str()), *cnt);
        }
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} sheets={} skipped_sheets={} scanned={} accepted={} rejected={} dates={} sessions={} warnings={}",
            self.cnt_sheets,
            self.cnt_sheets_skipped,
            self.cnt_scanned,
            self.cnt_accepted,
            self.cnt_rejected,
            self.cnt_dates,
            self.cnt_sessions,
            self.warning_count()
        )
    }
}

impl fmt::Display for ReportE1rm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[E1RM]"))
    }
}

/// Mutable accumulator for run statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportE1rmBuilder {
    pub cnt_sheets: u64,
    pub cnt_sheets_skipped: u64,
    pub cnt_scanned: u64,
    pub cnt_accepted: u64,
    pub rejections: BTreeMap<EnumRowRejection, u64>,
    pub warnings: Vec<String>,
}

impl ReportE1rmBuilder {
    pub fn add_sheet(&mut self) {
        self.cnt_sheets += 1;
    }

    /// Count a sheet skipped on schema mismatch, with its reason as a warning.
    pub fn add_skipped_sheet(&mut self, warning: String) {
        self.cnt_sheets_skipped += 1;
        self.warnings.push(warning);
    }

    pub fn add_scanned(&mut self, value: u64) {
        self.cnt_scanned += value;
    }

    pub fn add_accepted(&mut self, value: u64) {
        self.cnt_accepted += value;
    }

    pub fn add_rejection(&mut self, reason: EnumRowRejection) {
        *self.rejections.entry(reason).or_insert(0) += 1;
    }

    /// Fold another builder's row counters into this one.
    pub fn merge_rows(&mut self, other: ReportE1rmBuilder) {
        self.cnt_scanned += other.cnt_scanned;
        self.cnt_accepted += other.cnt_accepted;
        for (reason, cnt) in other.rejections {
            *self.rejections.entry(reason).or_insert(0) += cnt;
        }
        self.warnings.extend(other.warnings);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self, cnt_dates: u64, cnt_sessions: u64) -> ReportE1rm {
        ReportE1rm {
            cnt_sheets: self.cnt_sheets,
            cnt_sheets_skipped: self.cnt_sheets_skipped,
            cnt_scanned: self.cnt_scanned,
            cnt_accepted: self.cnt_accepted,
            cnt_rejected: self.rejections.values().sum(),
            cnt_dates,
            cnt_sessions,
            rejections: self.rejections,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ReportE1rm, ReportE1rmBuilder};
    use crate::spec::EnumRowRejection;

    #[test]
    fn report_to_dict_and_format() {
        let mut builder = ReportE1rmBuilder::default();
        builder.add_sheet();
        builder.add_scanned(7);
        builder.add_accepted(4);
        builder.add_rejection(EnumRowRejection::NotCompleted);
        builder.add_rejection(EnumRowRejection::NotCompleted);
        builder.add_rejection(EnumRowRejection::MarkedMissed);
        builder.add_warning("w".to_string());
        let report: ReportE1rm = builder.build(2, 3);

        assert_eq!(report.cnt_rejected, 3);
        assert_eq!(report.rejected_by(EnumRowRejection::NotCompleted), 2);
        assert_eq!(report.rejected_by(EnumRowRejection::MissingDate), 0);

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_scanned"], 7);
        assert_eq!(dict_counts["cnt_accepted"], 4);
        assert_eq!(dict_counts["rejected_not_completed"], 2);
        assert_eq!(dict_counts["rejected_marked_missed"], 1);
        assert_eq!(dict_counts["cnt_warnings"], 1);
        assert!(!dict_counts.contains_key("rejected_missing_date"));

        let txt = report.format("[E1RM]");
        assert_eq!(
            txt,
            "[E1RM] sheets=1 skipped_sheets=0 scanned=7 accepted=4 rejected=3 dates=2 sessions=3 warnings=1"
        );
        assert_eq!(report.to_string(), txt);
    }

    #[test]
    fn report_counts_warnings_appended_after_build() {
        let mut builder = ReportE1rmBuilder::default();
        builder.add_sheet();
        builder.add_warning("sheet skipped".to_string());
        let mut report = builder.build(1, 1);

        report
            .warnings
            .extend(["No Press data; chart skipped.".to_string()]);
        assert_eq!(report.warning_count(), 2);
        assert_eq!(report.to_dict()["cnt_warnings"], 2);
        assert!(report.format("[E1RM]").ends_with("warnings=2"));
    }

    #[test]
    fn builder_merge_rows_sums_counters() {
        let mut left = ReportE1rmBuilder::default();
        left.add_scanned(2);
        left.add_rejection(EnumRowRejection::NoAssignedReps);

        let mut right = ReportE1rmBuilder::default();
        right.add_scanned(3);
        right.add_accepted(3);
        right.add_rejection(EnumRowRejection::NoAssignedReps);

        left.merge_rows(right);
        let report = left.build(0, 0);
        assert_eq!(report.cnt_scanned, 5);
        assert_eq!(report.cnt_accepted, 3);
        assert_eq!(report.rejected_by(EnumRowRejection::NoAssignedReps), 2);
    }
}
