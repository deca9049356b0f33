use std::{fmt::Display, path::PathBuf};

use clap::Parser;
use mtlmon_core::{Formula, Monitor};

use crate::load;

/// Print the monitor's state step by step.
#[derive(Debug, Clone, Parser)]
#[deny(missing_docs)]
pub(crate) struct TraceArgs {
    /// Path of the CSV trace of `timestamp,symbol` observations.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub(crate) trace: PathBuf,
}

/// Renders the full internal state of the monitor.
pub(crate) struct Dump<'a>(pub(crate) &'a Monitor<String>);

impl Display for Dump<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let monitor = self.0;
        writeln!(
            f,
            "Timestamp/Offset: {}/{}",
            monitor.timestamp(),
            monitor.offset()
        )?;
        writeln!(f, "Symbol: {}", monitor.symbol().map_or("", String::as_str))?;
        writeln!(f, "History:")?;
        for verdict in monitor.history() {
            writeln!(f, "  {verdict}")?;
        }
        writeln!(f, "Subformulae:")?;
        for (idx, formula) in monitor.subformulae().iter().enumerate() {
            writeln!(f, "  {idx}: {formula}")?;
        }
        writeln!(f, "Previous:")?;
        for (idx, expr) in monitor.previous().iter().enumerate() {
            writeln!(f, "  {idx}: {expr}")?;
        }
        writeln!(f, "Current:")?;
        for (idx, expr) in monitor.current().iter().enumerate() {
            writeln!(f, "  {idx}: {expr}")?;
        }
        Ok(())
    }
}

impl TraceArgs {
    pub(crate) fn trace(&self, formula: Formula<String>) -> anyhow::Result<()> {
        let observations = load::trace(&self.trace)?;
        let mut monitor = Monitor::new(formula);
        println!("{}", Dump(&monitor));
        for (timestamp, symbol) in observations {
            println!("Observation: ({timestamp}, {symbol})");
            monitor.step(timestamp, symbol)?;
            println!("{}", Dump(&monitor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtlmon_core::Interval;

    #[test]
    fn initial_dump() {
        let monitor = Monitor::new(Formula::next(
            Formula::atom("a".to_string()),
            Interval::new(0, 0),
        ));
        let dump = Dump(&monitor).to_string();
        assert!(dump.starts_with("Timestamp/Offset: -1/0\nSymbol: \nHistory:\nSubformulae:\n"));
        assert!(dump.contains("  0: x=a\n"));
        assert!(dump.contains("  1: NEXT x=a [0-0]\n"));
        assert!(dump.ends_with("Previous:\n  0: FALSE\n  1: FALSE\nCurrent:\n  0: NOW FALSE\n  1: NOW FALSE\n"));
    }

    #[test]
    fn dump_after_step() {
        let mut monitor = Monitor::new(Formula::atom("a".to_string()));
        monitor.step(3, "a".to_string()).expect("step");
        let dump = Dump(&monitor).to_string();
        assert!(dump.starts_with("Timestamp/Offset: 3/0\nSymbol: a\n"));
    }
}
