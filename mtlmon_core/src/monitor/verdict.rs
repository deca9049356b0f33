use crate::{BoolExpr, Time};
use std::collections::{HashMap, HashSet};
use std::fmt::Display;

/// Position of an observation in the stream:
/// its timestamp, and how many earlier observations share the same timestamp.
///
/// Stamps are ordered lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Stamp {
    /// Timestamp of the observation.
    pub timestamp: Time,
    /// Number of preceding observations with the same timestamp.
    pub offset: u32,
}

impl Display for Stamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.timestamp, self.offset)
    }
}

/// A top-level verdict that was still undetermined at some point:
/// the observation it refers to and what is known about it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Verdict {
    /// The observation the verdict refers to.
    pub stamp: Stamp,
    /// Current knowledge about the verdict.
    pub expr: BoolExpr,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.stamp, self.expr)
    }
}

/// Removes, in place, the verdicts which are either
///
/// - already resolved to [`BoolExpr::True`] or [`BoolExpr::False`], or
/// - equal to another verdict with a smaller [`Stamp`].
pub fn filter_verdicts(verdicts: &mut HashSet<Verdict>) {
    verdicts.retain(|verdict| !verdict.expr.is_constant());

    let mut earliest: HashMap<BoolExpr, Stamp> = HashMap::with_capacity(verdicts.len());
    for verdict in verdicts.iter() {
        earliest
            .entry(verdict.expr.clone())
            .and_modify(|stamp| *stamp = (*stamp).min(verdict.stamp))
            .or_insert(verdict.stamp);
    }
    verdicts.retain(|verdict| earliest.get(&verdict.expr) == Some(&verdict.stamp));
}
