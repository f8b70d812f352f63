//! `liftkit` command-line entry point.
//!
//! ```bash
//! # Aggregate one BLOC export into liftkit_e1rm.xlsx
//! liftkit process bloc_export.csv
//!
//! # Several exports, explicit output, four workers, no charts
//! liftkit process a.csv b.csv -o progress.xlsx --workers 4 --no-charts
//!
//! # Epley estimate for one set
//! liftkit estimate 5 100
//! ```

mod run;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use liftkit_e1rm::estimate_e1rm;
use liftkit_io_xlsx::C_SHEET_NAME_OUTPUT;
use liftkit_log::{C_LOG_LEVEL_DEFAULT, EnumLogFormat, SpecLogOptions, init_logging};

use crate::run::{C_FILE_OUT_DEFAULT, run_process};

#[derive(Parser)]
#[command(
    name = "liftkit",
    version,
    about = "Best Epley e1RM per lift per workout day from workout-log exports"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log filter directive; RUST_LOG wins when set
    #[arg(long, global = true, env = "LIFTKIT_LOG", default_value = C_LOG_LEVEL_DEFAULT)]
    log_level: String,

    /// Log layout: pretty, compact or json
    #[arg(long, global = true, default_value_t = EnumLogFormat::Compact)]
    log_format: EnumLogFormat,
}

#[derive(Subcommand)]
enum Command {
    /// Aggregate CSV exports into an e1RM workbook with progress charts
    Process(ProcessArgs),

    /// Print the Epley estimate for a single set
    Estimate {
        /// Repetitions performed
        reps: u32,
        /// Weight lifted
        weight: f64,
    },
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ProcessArgs {
    /// Input CSV files (comma-separated when given through LIFTKIT_INPUT)
    #[arg(required = true, env = "LIFTKIT_INPUT", value_delimiter = ',')]
    pub(crate) inputs: Vec<PathBuf>,

    /// Output workbook path
    #[arg(short, long, env = "LIFTKIT_OUTPUT", default_value = C_FILE_OUT_DEFAULT)]
    pub(crate) output: PathBuf,

    /// Maximum worker threads; defaults to the CPU count capped at 8
    #[arg(long, env = "LIFTKIT_WORKERS")]
    pub(crate) workers: Option<usize>,

    /// Name of the aggregated sheet
    #[arg(long, default_value = C_SHEET_NAME_OUTPUT)]
    pub(crate) sheet_name: String,

    /// Skip the per-lift progress chartsheets
    #[arg(long)]
    pub(crate) no_charts: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&SpecLogOptions {
        level: cli.log_level.clone(),
        format: cli.log_format,
        ..Default::default()
    })
    .context("initializing logging")?;

    match cli.command {
        Command::Process(args) => {
            let outcome = run_process(&args)?;
            println!("{}", outcome.report_e1rm);
            println!(
                "[XLSX] file={} sheet={:?} rows={} charts={}",
                outcome.file_out,
                outcome.report_xlsx.sheet_name,
                outcome.report_xlsx.cnt_rows,
                outcome.report_xlsx.chart_sheets.len()
            );
        }
        Command::Estimate { reps, weight } => {
            let e1rm = estimate_e1rm(reps, weight)?;
            println!("{e1rm}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn cli_parses_process_arguments() {
        let cli = Cli::try_parse_from([
            "liftkit",
            "process",
            "a.csv",
            "b.csv",
            "-o",
            "out.xlsx",
            "--workers",
            "3",
            "--no-charts",
            "--log-format",
            "json",
        ])
        .expect("parse");

        let Command::Process(args) = cli.command else {
            panic!("expected process");
        };
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.output.to_string_lossy(), "out.xlsx");
        assert_eq!(args.workers, Some(3));
        assert!(args.no_charts);
        assert_eq!(args.sheet_name, "Processed E1RMs");
        assert_eq!(cli.log_format, liftkit_log::EnumLogFormat::Json);
    }

    #[test]
    fn cli_parses_estimate() {
        let cli = Cli::try_parse_from(["liftkit", "estimate", "5", "100"]).expect("parse");
        assert!(matches!(cli.command, Command::Estimate { reps: 5, .. }));
    }

    #[test]
    fn cli_rejects_bad_log_format() {
        let l_args = ["liftkit", "--log-format", "xml", "estimate", "1", "1"];
        assert!(Cli::try_parse_from(l_args).is_err());
    }
}
