mod verdict;

use crate::{BoolExpr, Deferred, Formula, FunExpr, Interval, Time};
use log::{debug, info, trace};
use std::collections::HashSet;
use std::fmt::Debug;
use thiserror::Error;
pub use verdict::{Stamp, Verdict, filter_verdicts};

/// Errors raised when feeding observations to a [`Monitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MonitorError {
    /// Observations have to be fed in non-decreasing time order.
    #[error("observation at time {next} precedes current time {last}")]
    TimeRegression {
        /// Time of the latest observation.
        last: Time,
        /// Time of the rejected observation.
        next: Time,
    },
    /// The time elapsed since the latest observation does not fit a [`Time`].
    #[error("time elapsed from {last} to {next} overflows")]
    TimeOverflow {
        /// Time of the latest observation.
        last: Time,
        /// Time of the rejected observation.
        next: Time,
    },
}

/// What is known about the top-level formula
/// at the latest observation whose verdict has been computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The formula holds.
    Satisfied,
    /// The formula does not hold.
    Violated,
    /// The verdict still depends on future observations.
    Pending,
}

impl From<&BoolExpr> for Outcome {
    fn from(value: &BoolExpr) -> Self {
        match value.as_bool() {
            Some(true) => Outcome::Satisfied,
            Some(false) => Outcome::Violated,
            None => Outcome::Pending,
        }
    }
}

// A subformula whose arguments are given by their index in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node<S> {
    Proposition(S),
    Negation(usize),
    Or(usize, usize),
    Previous(usize, Interval),
    Next(usize, Interval),
    Since(usize, usize, Interval),
    Until(usize, usize, Interval),
}

// Index of the first entry of the table structurally equal to the formula.
fn lookup<S: PartialEq + Debug>(table: &[Formula<S>], formula: &Formula<S>) -> usize {
    table
        .iter()
        .position(|f| f == formula)
        .unwrap_or_else(|| panic!("subformula {formula:?} missing from table"))
}

fn nodes<S: Clone + PartialEq + Debug>(table: &[Formula<S>]) -> Vec<Node<S>> {
    table
        .iter()
        .map(|formula| match formula {
            Formula::Proposition(symbol) => Node::Proposition(symbol.clone()),
            Formula::Negation(sub) => Node::Negation(lookup(table, sub)),
            Formula::Or(subs) => Node::Or(lookup(table, &subs.0), lookup(table, &subs.1)),
            Formula::Previous(sub, interval) => Node::Previous(lookup(table, sub), *interval),
            Formula::Next(sub, interval) => Node::Next(lookup(table, sub), *interval),
            Formula::Since(subs, interval) => Node::Since(
                lookup(table, &subs.0),
                lookup(table, &subs.1),
                *interval,
            ),
            Formula::Until(subs, interval) => Node::Until(
                lookup(table, &subs.0),
                lookup(table, &subs.1),
                *interval,
            ),
        })
        .collect()
}

/// An incremental monitor for a [`Formula`] over a stream of time-stamped symbols.
///
/// The formula is flattened into a table of subformulae,
/// where each temporal operator is followed by its delay-copies,
/// i.e., copies with the interval decremented one step at a time until empty.
/// The table is in reverse pre-order, so arguments always come before the formulae using them
/// and the monitored formula is last.
///
/// For each entry of the table, the monitor keeps
///
/// - the value at the latest observation whose following time distance is known, as a [`BoolExpr`];
/// - the value at the latest observation, as a [`FunExpr`] of the time elapsing until the next one.
#[derive(Debug, Clone)]
pub struct Monitor<S> {
    formula: Formula<S>,
    subformulae: Vec<Formula<S>>,
    nodes: Vec<Node<S>>,
    previous: Vec<BoolExpr>,
    current: Vec<FunExpr>,
    history: HashSet<Verdict>,
    timestamp: Time,
    offset: u32,
    symbol: Option<S>,
}

impl<S: Clone + Eq + Debug> Monitor<S> {
    /// Creates a monitor for the given formula, ready to receive the first observation.
    pub fn new(formula: Formula<S>) -> Self {
        let mut subformulae = Vec::new();
        formula.unroll(&mut subformulae);
        subformulae.reverse();
        subformulae.shrink_to_fit();
        let nodes = nodes(&subformulae);
        let len = subformulae.len();
        info!("monitor built with {len} subformulae");

        Self {
            formula,
            subformulae,
            nodes,
            previous: vec![BoolExpr::False; len],
            current: vec![FunExpr::Now(BoolExpr::False); len],
            history: HashSet::new(),
            timestamp: -1,
            offset: 0,
            symbol: None,
        }
    }

    /// Brings the monitor back to its initial state, before any observation.
    pub fn reset(&mut self) {
        self.history.clear();
        self.previous.fill(BoolExpr::False);
        self.current.fill(FunExpr::Now(BoolExpr::False));
        self.timestamp = -1;
        self.offset = 0;
        self.symbol = None;
    }

    /// The monitored formula.
    pub fn formula(&self) -> &Formula<S> {
        &self.formula
    }

    /// The table of subformulae, indexed as the variables of [`BoolExpr`].
    pub fn subformulae(&self) -> &[Formula<S>] {
        &self.subformulae
    }

    /// Number of subformulae in the table.
    pub fn len(&self) -> usize {
        self.subformulae.len()
    }

    /// The table is never empty, as it contains at least the monitored formula.
    pub fn is_empty(&self) -> bool {
        self.subformulae.is_empty()
    }

    /// Index of the first subformula in the table structurally equal to `formula`.
    pub fn index_of(&self, formula: &Formula<S>) -> Option<usize> {
        self.subformulae.iter().position(|f| f == formula)
    }

    /// Values of the subformulae at the second-latest observation.
    pub fn previous(&self) -> &[BoolExpr] {
        &self.previous
    }

    /// Values of the subformulae at the latest observation,
    /// as functions of the time elapsing until the next one.
    pub fn current(&self) -> &[FunExpr] {
        &self.current
    }

    /// Top-level verdicts still undetermined, sorted by [`Stamp`].
    pub fn history(&self) -> Vec<&Verdict> {
        let mut history = Vec::from_iter(self.history.iter());
        history.sort_unstable();
        history
    }

    /// Top-level verdict at the second-latest observation.
    pub fn verdict(&self) -> &BoolExpr {
        &self.previous[self.root()]
    }

    /// The [`Outcome`] of [`Monitor::verdict`].
    pub fn outcome(&self) -> Outcome {
        Outcome::from(self.verdict())
    }

    /// Timestamp of the latest observation, or `-1` if there has been none.
    pub fn timestamp(&self) -> Time {
        self.timestamp
    }

    /// Number of observations before the latest one sharing its same timestamp.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Symbol of the latest observation.
    pub fn symbol(&self) -> Option<&S> {
        self.symbol.as_ref()
    }

    #[inline(always)]
    fn root(&self) -> usize {
        self.subformulae.len() - 1
    }

    #[inline(always)]
    fn stamp(&self) -> Stamp {
        Stamp {
            timestamp: self.timestamp,
            offset: self.offset,
        }
    }

    // Left part of since and until: whether rhs matters at the latest observation.
    fn anchor(&self, rhs: usize, interval: Interval) -> FunExpr {
        if interval.begin() == 0 {
            FunExpr::Now(BoolExpr::False)
        } else {
            self.current[rhs].clone()
        }
    }

    // New value of the subformula at `idx`,
    // given the time elapsed since the previous observation and the newly observed symbol.
    // Entries before `idx` must have been progressed already.
    fn progress(&self, idx: usize, delta: Time, symbol: &S) -> FunExpr {
        match &self.nodes[idx] {
            Node::Proposition(expected) => FunExpr::Now(BoolExpr::from(expected == symbol)),
            Node::Negation(sub) => FunExpr::Neg(Box::new(self.current[*sub].clone())),
            Node::Or(lhs, rhs) => FunExpr::Or(Box::new((
                self.current[*lhs].clone(),
                self.current[*rhs].clone(),
            ))),
            Node::Previous(sub, interval) => {
                if interval.contains(delta) {
                    self.previous[*sub].substitute_functional(&self.current)
                } else {
                    FunExpr::Now(BoolExpr::False)
                }
            }
            Node::Next(sub, interval) => FunExpr::Later(Deferred::Lookup {
                index: *sub,
                interval: *interval,
            }),
            Node::Since(lhs, rhs, interval) => {
                let tail = if delta <= Time::from(interval.end()) {
                    FunExpr::Now(BoolExpr::False)
                } else {
                    // Look back at the entry `delta` positions before this one.
                    usize::try_from(delta)
                        .ok()
                        .and_then(|delta| idx.checked_sub(delta))
                        .map_or(FunExpr::Now(BoolExpr::False), |past| {
                            FunExpr::Or(Box::new((
                                self.current[*lhs].clone(),
                                self.previous[past].substitute_functional(&self.current),
                            )))
                        })
                };
                FunExpr::Or(Box::new((self.anchor(*rhs, *interval), tail)))
            }
            Node::Until(lhs, rhs, interval) => {
                let tail = FunExpr::Later(Deferred::UntilTail {
                    lhs: Box::new(self.current[*lhs].clone()),
                    interval: *interval,
                    index: idx,
                });
                FunExpr::Or(Box::new((self.anchor(*rhs, *interval), tail)))
            }
        }
    }

    /// Feeds a new observation to the monitor.
    ///
    /// Fails, leaving the monitor untouched, if `timestamp` precedes the latest observation
    /// or is so far from it that the elapsed time overflows.
    ///
    /// Decreasing timestamps are rejected on purpose,
    /// rather than counted as further observations at the current time.
    pub fn step(&mut self, timestamp: Time, symbol: S) -> Result<(), MonitorError> {
        if timestamp < self.timestamp {
            return Err(MonitorError::TimeRegression {
                last: self.timestamp,
                next: timestamp,
            });
        }
        let delta = timestamp
            .checked_sub(self.timestamp)
            .ok_or(MonitorError::TimeOverflow {
                last: self.timestamp,
                next: timestamp,
            })?;
        trace!("step at time {timestamp} (delta {delta}) with symbol {symbol:?}");

        for (previous, current) in self.previous.iter_mut().zip(&self.current) {
            *previous = current.eval(delta);
        }

        let mut verdicts = HashSet::with_capacity(self.history.len() + 1);
        verdicts.insert(Verdict {
            stamp: self.stamp(),
            expr: self.verdict().clone(),
        });
        verdicts.extend(self.history.drain().map(|verdict| Verdict {
            stamp: verdict.stamp,
            expr: verdict.expr.substitute(&self.previous),
        }));
        verdicts
            .iter()
            .filter(|verdict| verdict.expr.is_constant() && verdict.stamp.timestamp >= 0)
            .for_each(|verdict| debug!("verdict at {} resolved to {}", verdict.stamp, verdict.expr));
        filter_verdicts(&mut verdicts);
        self.history = verdicts;

        self.timestamp = timestamp;
        if delta > 0 {
            self.offset = 0;
        } else {
            self.offset += 1;
        }

        for idx in 0..self.current.len() {
            self.current[idx] = self.progress(idx, delta, &symbol);
        }
        self.symbol = Some(symbol);
        Ok(())
    }

    /// Resets the monitor and feeds it the whole pattern of observations, in order.
    ///
    /// Returns the [`Outcome`] of the top-level verdict at the end of the pattern.
    pub fn run<I>(&mut self, pattern: I) -> Result<Outcome, MonitorError>
    where
        I: IntoIterator<Item = (Time, S)>,
    {
        self.reset();
        info!("run starting");
        let start_time = std::time::Instant::now();
        let mut steps = 0usize;
        for (timestamp, symbol) in pattern {
            self.step(timestamp, symbol)?;
            steps += 1;
        }
        let elapsed = start_time.elapsed();
        info!("run of {steps} steps completed in {elapsed:0.2?}");
        Ok(self.outcome())
    }
}
