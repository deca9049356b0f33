use std::path::PathBuf;

use clap::Parser;
use log::info;
use mtlmon_core::{Formula, Monitor};

use crate::{load, progress::Bar, report::Report};

/// Monitor a trace
#[derive(Debug, Clone, Parser)]
pub(crate) struct VerifyArgs {
    /// Path of the CSV trace of `timestamp,symbol` observations (`.gz` for compressed traces)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub(crate) trace: PathBuf,
}

impl VerifyArgs {
    pub(crate) fn verify(
        &self,
        formula: Formula<String>,
        progress: Option<Bar>,
    ) -> anyhow::Result<Report> {
        let observations = load::trace(&self.trace)?;
        let steps = observations.len();
        let trace_name = self.trace.display().to_string();
        let mut monitor = Monitor::new(formula);
        if let Some(bar) = progress {
            let progress_bar = bar.progress_bar(steps as u64, &trace_name);
            monitor.reset();
            for (timestamp, symbol) in observations {
                monitor.step(timestamp, symbol)?;
                progress_bar.inc(1);
            }
            progress_bar.finish_and_clear();
            info!("monitoring outcome: {:?}", monitor.outcome());
        } else {
            monitor.run(observations)?;
        }
        Ok(Report::new(trace_name, steps, &monitor))
    }
}
