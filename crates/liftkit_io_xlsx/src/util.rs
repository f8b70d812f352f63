//! Sheet-name and index helpers shared by reader and writer.

use std::collections::BTreeSet;

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::XlsxIoError;

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Register `name` in `set_names_existing`, suffixing `__N` until it is unique.
///
/// Excel compares sheet names case-insensitively, so the set stores lowercase keys.
pub fn derive_unique_sheet_name(set_names_existing: &mut BTreeSet<String>, name: &str) -> String {
    if set_names_existing.insert(name.to_lowercase()) {
        return name.to_string();
    }

    let base_name: String = name
        .chars()
        .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
        .collect();

    let mut n_idx = 2usize;
    loop {
        let candidate: String = format!("{base_name}__{n_idx}")
            .chars()
            .take(N_LEN_EXCEL_SHEET_NAME_MAX)
            .collect();
        if set_names_existing.insert(candidate.to_lowercase()) {
            return candidate;
        }
        n_idx += 1;
    }
}

pub(crate) fn cast_row_num(value: usize) -> Result<u32, XlsxIoError> {
    u32::try_from(value).map_err(|_| XlsxIoError::IndexOverflow { axis: "row", value })
}

pub(crate) fn cast_col_num(value: usize) -> Result<u16, XlsxIoError> {
    u16::try_from(value).map_err(|_| XlsxIoError::IndexOverflow {
        axis: "column",
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{cast_col_num, derive_unique_sheet_name, sanitize_sheet_name};

    #[test]
    fn sanitize_sheet_name_replaces_illegal_and_truncates() {
        assert_eq!(sanitize_sheet_name("a/b:c", "_"), "a_b_c");
        assert_eq!(sanitize_sheet_name("   ", "_"), "Sheet");
        let c_long = "x".repeat(40);
        assert_eq!(sanitize_sheet_name(&c_long, "_").chars().count(), 31);
        assert_eq!(sanitize_sheet_name("Processed E1RMs", "_"), "Processed E1RMs");
    }

    #[test]
    fn derive_unique_sheet_name_suffixes_duplicates() {
        let mut set_names = BTreeSet::new();
        assert_eq!(derive_unique_sheet_name(&mut set_names, "Squat Progress"), "Squat Progress");
        assert_eq!(
            derive_unique_sheet_name(&mut set_names, "Squat Progress"),
            "Squat Progress__2"
        );
        assert_eq!(
            derive_unique_sheet_name(&mut set_names, "squat progress"),
            "squat progress__3"
        );
    }

    #[test]
    fn derive_unique_sheet_name_stays_within_excel_limit() {
        let mut set_names = BTreeSet::new();
        let c_name = "y".repeat(31);
        derive_unique_sheet_name(&mut set_names, &c_name);
        let c_next = derive_unique_sheet_name(&mut set_names, &c_name);
        assert_eq!(c_next.chars().count(), 31);
        assert!(c_next.ends_with("__2"));
    }

    #[test]
    fn cast_col_num_rejects_overflow() {
        assert_eq!(cast_col_num(3).expect("fits"), 3);
        assert!(cast_col_num(70_000).is_err());
    }
}
