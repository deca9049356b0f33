use crate::{BoolExpr, Interval, Time};
use std::fmt::Display;

/// Knowledge about a subformula that depends on how much time elapses
/// before the next observation.
///
/// Once the elapsed time is known, [`FunExpr::eval`] reduces it to a [`BoolExpr`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunExpr {
    /// Value known independently of the elapsed time.
    Now(BoolExpr),
    /// Value computed from the elapsed time.
    Later(Deferred),
    /// Logical negation.
    Neg(Box<FunExpr>),
    /// Logical disjunction.
    Or(Box<(FunExpr, FunExpr)>),
    /// Logical conjunction.
    And(Box<(FunExpr, FunExpr)>),
}

/// A pure mapping from the elapsed time to a [`BoolExpr`], represented as data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// The indexed subformula, provided the elapsed time falls within the interval.
    Lookup {
        /// Index of the looked-up subformula.
        index: usize,
        /// Admissible elapsed times.
        interval: Interval,
    },
    /// The remainder of an until operator:
    /// its lhs, and the delay-copy of the operator that is `elapsed` entries before `index`,
    /// provided the elapsed time falls within the interval.
    UntilTail {
        /// Value of the lhs subformula.
        lhs: Box<FunExpr>,
        /// Admissible elapsed times.
        interval: Interval,
        /// Index of the until operator.
        index: usize,
    },
}

impl Deferred {
    /// Computes the value of the mapping for the given elapsed time.
    pub fn resolve(&self, elapsed: Time) -> BoolExpr {
        match self {
            Deferred::Lookup { index, interval } => {
                if interval.contains(elapsed) {
                    BoolExpr::Var(*index)
                } else {
                    BoolExpr::False
                }
            }
            Deferred::UntilTail {
                lhs,
                interval,
                index,
            } => {
                let tail = if interval.contains(elapsed) {
                    usize::try_from(elapsed)
                        .ok()
                        .and_then(|elapsed| index.checked_sub(elapsed))
                        .map_or(BoolExpr::False, BoolExpr::Var)
                } else {
                    BoolExpr::False
                };
                BoolExpr::and(lhs.eval(elapsed), tail)
            }
        }
    }
}

impl FunExpr {
    /// Reduces the expression to a simplified [`BoolExpr`],
    /// given the time elapsed since it was computed.
    pub fn eval(&self, elapsed: Time) -> BoolExpr {
        match self {
            FunExpr::Now(expr) => expr.simplify(),
            FunExpr::Later(deferred) => deferred.resolve(elapsed),
            FunExpr::Neg(expr) => BoolExpr::not(expr.eval(elapsed)),
            FunExpr::Or(exprs) => BoolExpr::or(exprs.0.eval(elapsed), exprs.1.eval(elapsed)),
            FunExpr::And(exprs) => BoolExpr::and(exprs.0.eval(elapsed), exprs.1.eval(elapsed)),
        }
    }

    /// Whether the expression can be evaluated without knowing the elapsed time.
    pub fn is_now(&self) -> bool {
        match self {
            FunExpr::Now(_) => true,
            FunExpr::Later(_) => false,
            FunExpr::Neg(expr) => expr.is_now(),
            FunExpr::Or(exprs) | FunExpr::And(exprs) => exprs.0.is_now() && exprs.1.is_now(),
        }
    }
}

impl Display for FunExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FunExpr::Now(expr) => write!(f, "NOW {expr}"),
            FunExpr::Later(deferred) => write!(f, "LATER t -> {}", deferred.resolve(0)),
            FunExpr::Neg(expr) => write!(f, "NOT {expr}"),
            FunExpr::Or(exprs) => write!(f, "{} OR {}", exprs.0, exprs.1),
            FunExpr::And(exprs) => write!(f, "{} AND {}", exprs.0, exprs.1),
        }
    }
}
