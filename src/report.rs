use mtlmon_core::{Monitor, Outcome, Time};
use serde::Serialize;
use std::fmt::Display;

#[derive(Serialize)]
pub(crate) struct PendingVerdict {
    pub(crate) timestamp: Time,
    pub(crate) offset: u32,
    pub(crate) verdict: String,
}

#[derive(Serialize)]
pub(crate) struct Report {
    pub(crate) formula: String,
    pub(crate) trace: String,
    pub(crate) subformulae: usize,
    pub(crate) steps: usize,
    pub(crate) outcome: &'static str,
    pub(crate) verdict: String,
    pub(crate) pending: Vec<PendingVerdict>,
}

fn outcome_name(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Satisfied => "satisfied",
        Outcome::Violated => "violated",
        Outcome::Pending => "pending",
    }
}

impl Report {
    pub(crate) fn new(trace: String, steps: usize, monitor: &Monitor<String>) -> Self {
        Report {
            formula: monitor.formula().to_string(),
            trace,
            subformulae: monitor.len(),
            steps,
            outcome: outcome_name(monitor.outcome()),
            verdict: monitor.verdict().to_string(),
            pending: monitor
                .history()
                .into_iter()
                .map(|verdict| PendingVerdict {
                    timestamp: verdict.stamp.timestamp,
                    offset: verdict.stamp.offset,
                    verdict: verdict.expr.to_string(),
                })
                .collect(),
        }
    }

    pub(crate) fn print(&self, json: bool) {
        if json {
            let report = serde_json::ser::to_string_pretty(&self).expect("report serialization");
            println!("{report}");
        } else {
            // Print final report
            println!("{self}");
        };
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "mtlmon results for {} on {} ({} subformulae)",
            self.formula, self.trace, self.subformulae
        )?;
        writeln!(f, "Completed {} steps", self.steps)?;
        writeln!(f, "Final verdict: {} ({})", self.verdict, self.outcome)?;
        if self.pending.is_empty() {
            write!(f, "No pending verdicts")?;
        } else {
            write!(f, "Pending verdicts:")?;
            for pending in self.pending.iter() {
                write!(
                    f,
                    "\n  ({}, {}) {}",
                    pending.timestamp, pending.offset, pending.verdict
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtlmon_core::{Formula, Interval};

    fn monitor() -> Monitor<String> {
        let formula = Formula::until(
            Formula::atom("a".to_string()),
            Formula::atom("b".to_string()),
            Interval::new(0, 1),
        );
        let mut monitor = Monitor::new(formula);
        let pattern = [(1, "a"), (2, "a"), (2, "a"), (3, "b")];
        monitor
            .run(pattern.map(|(t, s)| (t, s.to_string())))
            .expect("run");
        monitor
    }

    #[test]
    fn display() {
        let report = Report::new("trace.csv".to_string(), 4, &monitor());
        assert_eq!(
            report.to_string(),
            "mtlmon results for UNTIL x=a [0-1] x=b on trace.csv (4 subformulae)\n\
             Completed 4 steps\n\
             Final verdict: VAR 2 (pending)\n\
             Pending verdicts:\n  (2, 0) VAR 2"
        );
    }

    #[test]
    fn json() {
        let report = Report::new("trace.csv".to_string(), 4, &monitor());
        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["outcome"], "pending");
        assert_eq!(value["pending"][0]["timestamp"], 2);
        assert_eq!(value["pending"][0]["verdict"], "VAR 2");
    }
}
