//! Incremental runtime monitoring of timed temporal-logic formulas
//! over time-stamped symbol streams.
//!
//! A [`Formula`] is flattened once into an indexed table of subformulae,
//! with bounded intervals unrolled into delay-copies.
//! Every new observation then progresses the pending knowledge of each subformula,
//! represented through two symbolic algebras:
//!
//! - [`BoolExpr`], boolean expressions over the values of subformulae at the next observation;
//! - [`FunExpr`], expressions whose value depends on how much time elapses before the next observation.
//!
//! The top-level verdicts that cannot be decided yet are kept in a deduplicated history,
//! which is re-evaluated at every step.
//!
//! ```
//! # use mtlmon_core::{BoolExpr, Formula, Interval, Monitor};
//! let formula = Formula::until(Formula::atom('a'), Formula::atom('b'), Interval::new(0, 1));
//! let mut monitor = Monitor::new(formula);
//! monitor
//!     .run([(1, 'a'), (2, 'a'), (2, 'a'), (3, 'b')])
//!     .expect("time never decreases");
//! assert_eq!(monitor.verdict(), &BoolExpr::Var(2));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod boolean;
mod formula;
mod functional;
mod interval;
mod monitor;

pub use boolean::BoolExpr;
pub use formula::Formula;
pub use functional::{Deferred, FunExpr};
pub use interval::Interval;
pub use monitor::{Monitor, MonitorError, Outcome, Stamp, Verdict, filter_verdicts};

/// The type that represents time.
///
/// Signed, since a fresh monitor sits at time `-1`, before any observation.
pub type Time = i64;
