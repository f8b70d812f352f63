//! `liftkit process`: read → aggregate → write.

use anyhow::Context;
use liftkit_e1rm::{ReportE1rm, SpecE1rmOptions, derive_default_e1rm_options, process_sheets};
use liftkit_io_xlsx::{E1rmXlsxWriter, SpecXlsxReport, SpecXlsxWriteOptions, read_csv_tables};
use tracing::{info, warn};

use crate::ProcessArgs;

pub(crate) const C_FILE_OUT_DEFAULT: &str = "liftkit_e1rm.xlsx";

#[derive(Debug)]
pub(crate) struct SpecProcessOutcome {
    pub(crate) file_out: String,
    pub(crate) report_e1rm: ReportE1rm,
    pub(crate) report_xlsx: SpecXlsxReport,
}

pub(crate) fn run_process(args: &ProcessArgs) -> anyhow::Result<SpecProcessOutcome> {
    info!("Reading {} input file(s)", args.inputs.len());
    let l_tables = read_csv_tables(&args.inputs).context("reading workout-log exports")?;

    let options = SpecE1rmOptions {
        num_workers_max: args.workers,
        ..derive_default_e1rm_options()
    };
    let run = process_sheets(&l_tables, &options).context("aggregating e1RMs")?;
    for c_warning in &run.report.warnings {
        warn!("{c_warning}");
    }

    let write_options = SpecXlsxWriteOptions {
        sheet_name_output: args.sheet_name.clone(),
        if_write_charts: !args.no_charts,
        ..Default::default()
    };
    let mut writer = E1rmXlsxWriter::with_defaults(args.output.clone(), write_options);
    writer
        .write_output_table(&run.table)
        .context("writing e1RM sheet")?;
    writer
        .close()
        .with_context(|| format!("saving {}", writer.file_out()))?;

    let report_xlsx = writer.report().into_iter().next().unwrap_or_default();
    for c_warning in &report_xlsx.warnings {
        warn!("{c_warning}");
    }

    Ok(SpecProcessOutcome {
        file_out: writer.file_out(),
        report_e1rm: run.report,
        report_xlsx,
    })
}
