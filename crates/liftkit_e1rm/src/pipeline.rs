//! Sheet-level orchestration: resolve, filter, estimate, aggregate, build.

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::aggregate::SessionAggregator;
use crate::column::resolve_column_map;
use crate::filter::resolve_lift_record;
use crate::output::build_output_table;
use crate::report::{ReportE1rm, ReportE1rmBuilder};
use crate::spec::{
    E1rmError, EnumCellValue, SpecColumnMap, SpecE1rmOptions, SpecOutputTable, SpecRawTable,
};
use crate::util::calculate_worker_limit;

/// Output table plus report of one successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecE1rmRun {
    pub table: SpecOutputTable,
    pub report: ReportE1rm,
}

/// Aggregate one sheet into its best-e1RM table.
///
/// Fails with [`E1rmError::SchemaMismatch`] before any row is processed when a
/// required header is absent, and with [`E1rmError::NoDataFound`] when no row
/// produced a lift record.
pub fn process_sheet(
    table: &SpecRawTable,
    options: &SpecE1rmOptions,
) -> Result<SpecE1rmRun, E1rmError> {
    let n_workers_max = calculate_worker_limit(options.num_workers_max);
    let mut builder_report = ReportE1rmBuilder::default();
    builder_report.add_sheet();

    let aggregator = aggregate_sheet(0, table, options, n_workers_max, &mut builder_report)?;
    finalize_run(aggregator, builder_report)
}

/// Aggregate several sheets into one table.
///
/// A sheet whose schema does not resolve is skipped with a warning and the
/// remaining sheets continue. If no sheet resolves at all, the first schema
/// error is returned. Equal e1RMs on the same session are settled in favor of
/// the earlier sheet in `tables`, then the earlier row.
pub fn process_sheets(
    tables: &[SpecRawTable],
    options: &SpecE1rmOptions,
) -> Result<SpecE1rmRun, E1rmError> {
    let n_workers_max = calculate_worker_limit(options.num_workers_max);
    let mut builder_report = ReportE1rmBuilder::default();
    let mut aggregator_total = SessionAggregator::new();
    let mut err_schema_first: Option<E1rmError> = None;
    let mut n_sheets_resolved = 0usize;

    for (sheet_idx, table) in tables.iter().enumerate() {
        builder_report.add_sheet();
        match aggregate_sheet(sheet_idx, table, options, n_workers_max, &mut builder_report) {
            Ok(aggregator) => {
                n_sheets_resolved += 1;
                aggregator_total.merge(aggregator);
            }
            Err(err @ (E1rmError::SchemaMismatch { .. } | E1rmError::EmptyTable { .. })) => {
                warn!(sheet = %table.name, error = %err, "Skipping sheet");
                builder_report.add_skipped_sheet(err.to_string());
                err_schema_first.get_or_insert(err);
            }
            Err(err) => return Err(err),
        }
    }

    if n_sheets_resolved == 0
        && let Some(err) = err_schema_first
    {
        return Err(err);
    }
    finalize_run(aggregator_total, builder_report)
}

fn finalize_run(
    aggregator: SessionAggregator,
    builder_report: ReportE1rmBuilder,
) -> Result<SpecE1rmRun, E1rmError> {
    if aggregator.is_empty() {
        warn!(
            scanned = builder_report.cnt_scanned,
            "No completed lifts found in input"
        );
        return Err(E1rmError::NoDataFound);
    }

    let table = build_output_table(&aggregator);
    let report = builder_report.build(table.height() as u64, aggregator.len() as u64);
    info!("{report}");
    Ok(SpecE1rmRun { table, report })
}

fn aggregate_sheet(
    sheet_idx: usize,
    table: &SpecRawTable,
    options: &SpecE1rmOptions,
    n_workers_max: usize,
    builder_report: &mut ReportE1rmBuilder,
) -> Result<SessionAggregator, E1rmError> {
    if table.header.is_empty() {
        return Err(E1rmError::EmptyTable {
            sheet: table.name.clone(),
        });
    }
    let column_map = resolve_column_map(&table.name, &table.header, &options.vocabulary)?;
    debug!(sheet = %table.name, ?column_map, "Resolved header row");

    let (aggregator, builder_rows) =
        fold_rows(sheet_idx, &table.rows, &column_map, n_workers_max)?;
    builder_report.merge_rows(builder_rows);
    Ok(aggregator)
}

fn fold_rows(
    sheet_idx: usize,
    rows: &[Vec<EnumCellValue>],
    column_map: &SpecColumnMap,
    n_workers_max: usize,
) -> Result<(SessionAggregator, ReportE1rmBuilder), E1rmError> {
    if n_workers_max <= 1 || rows.len() < 2 {
        return fold_row_chunk(sheet_idx, 0, rows, column_map);
    }

    let thread_pool = ThreadPoolBuilder::new().num_threads(n_workers_max).build();
    let Ok(thread_pool) = thread_pool else {
        let (aggregator, mut builder_rows) = fold_row_chunk(sheet_idx, 0, rows, column_map)?;
        builder_rows.add_warning(format!(
            "Failed to initialize thread pool (workers={n_workers_max}); fallback to serial aggregation."
        ));
        return Ok((aggregator, builder_rows));
    };

    let n_rows_chunk = usize::max(1, rows.len().div_ceil(n_workers_max));
    let l_partials = thread_pool.install(|| {
        rows.par_chunks(n_rows_chunk)
            .enumerate()
            .map(|(n_idx_chunk, rows_chunk)| {
                fold_row_chunk(sheet_idx, n_idx_chunk * n_rows_chunk, rows_chunk, column_map)
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    let mut aggregator = SessionAggregator::new();
    let mut builder_rows = ReportE1rmBuilder::default();
    for (aggregator_part, builder_part) in l_partials {
        aggregator.merge(aggregator_part);
        builder_rows.merge_rows(builder_part);
    }
    Ok((aggregator, builder_rows))
}

fn fold_row_chunk(
    sheet_idx: usize,
    n_row_offset: usize,
    rows: &[Vec<EnumCellValue>],
    column_map: &SpecColumnMap,
) -> Result<(SessionAggregator, ReportE1rmBuilder), E1rmError> {
    let mut aggregator = SessionAggregator::new();
    let mut builder_rows = ReportE1rmBuilder::default();
    builder_rows.add_scanned(rows.len() as u64);

    for (n_idx, row) in rows.iter().enumerate() {
        // Header occupies row 0.
        let row_idx = n_row_offset + n_idx + 1;
        match resolve_lift_record(row, sheet_idx, row_idx, column_map) {
            Ok(record) => {
                aggregator.fold(&record)?;
                builder_rows.add_accepted(1);
            }
            Err(reason) => {
                debug!(sheet_idx, row_idx, %reason, "Row skipped");
                builder_rows.add_rejection(reason);
            }
        }
    }
    Ok((aggregator, builder_rows))
}
