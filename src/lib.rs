//! # mtlmon
//!
//! mtlmon is a runtime monitor for timed temporal-logic formulas,
//! evaluated incrementally over time-stamped symbol streams.
//!
//! Formulas are given as JSON-encoded abstract syntax,
//! and traces as CSV files of `timestamp,symbol` rows (optionally gzip-compressed).
//! The monitoring engine itself lives in the `mtlmon_core` crate.

mod load;
mod progress;
mod report;
mod trace;
mod verify;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use mtlmon_core::Monitor;
use progress::Bar;
use trace::TraceArgs;
use verify::VerifyArgs;

/// mtlmon's available commands.
#[deny(missing_docs)]
#[derive(Subcommand)]
enum Commands {
    /// Validate the formula and build its monitor, without running it.
    Validate,
    /// Monitor a trace and report the final verdict.
    ///
    /// EXAMPLE: mtlmon PATH/TO/FORMULA.json verify PATH/TO/TRACE.csv
    /// EXAMPLE: mtlmon PATH/TO/FORMULA.json verify PATH/TO/TRACE.csv.gz --json
    #[clap(verbatim_doc_comment)]
    Verify {
        /// Args for trace monitoring.
        #[clap(flatten)]
        args: VerifyArgs,
        /// Print a progress bar while monitoring.
        ///
        /// By default, mtlmon only prints a terse message.
        /// For long traces, this flag has mtlmon print a progress bar
        /// with an estimate of the time to completion.
        #[arg(long, value_enum)]
        progress: Option<Bar>,
        /// Print JSON-serialized final report.
        ///
        /// By default, mtlmon prints a user-friendly report at the end of monitoring.
        /// This flag has the report printed in JSON format instead.
        #[arg(long)]
        json: bool,
    },
    /// Print the internal state of the monitor after each observation of a trace.
    Trace(TraceArgs),
}

/// A runtime monitor for timed temporal-logic formulas.
///
/// mtlmon progresses a formula over a time-stamped symbol stream,
/// keeping track of the verdicts that still depend on future observations.
#[derive(Parser)]
#[deny(missing_docs)]
#[command(version, about, long_about)]
pub struct Cli {
    /// Path of the JSON file with the formula's abstract syntax.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    formula: PathBuf,
    /// Verbose output
    #[command(flatten)]
    pub verbosity: clap_verbosity_flag::Verbosity,
    /// Actions to execute on the formula.
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let formula = load::formula(&self.formula)?;
        match self.command {
            Commands::Validate => {
                let monitor = Monitor::new(formula);
                info!("formula depth: {}", monitor.formula().depth());
                println!(
                    "formula '{}' successfully validated ({} subformulae)",
                    monitor.formula(),
                    monitor.len()
                );
            }
            Commands::Verify {
                args,
                progress,
                json,
            } => {
                if progress.is_none() {
                    eprint!("Monitoring in progress...");
                }
                let report = args.verify(formula, progress)?;
                if progress.is_none() {
                    eprintln!(" done!");
                }
                report.print(json);
            }
            Commands::Trace(args) => args.trace(formula)?,
        }
        Ok(())
    }
}

// From Clap tutorial <https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing>
#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
