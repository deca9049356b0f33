use crate::Interval;
use std::fmt::Display;

/// A timed temporal-logic formula over symbols of type `S`.
///
/// Temporal operators carry the [`Interval`] of admissible time distances.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula<S> {
    /// Holds when the observed symbol is exactly the given one.
    Proposition(S),
    /// Logical negation of a formula.
    Negation(Box<Formula<S>>),
    /// Logical disjunction of two formulae.
    Or(Box<(Formula<S>, Formula<S>)>),
    /// Temporal previous operator over a formula (with bounds).
    Previous(Box<Formula<S>>, Interval),
    /// Temporal next operator over a formula (with bounds).
    Next(Box<Formula<S>>, Interval),
    /// Temporal since operator over two formulae (with bounds).
    Since(Box<(Formula<S>, Formula<S>)>, Interval),
    /// Temporal until operator over two formulae (with bounds).
    Until(Box<(Formula<S>, Formula<S>)>, Interval),
}

impl<S> Formula<S> {
    /// Proposition holding on the given symbol.
    pub fn atom(symbol: S) -> Self {
        Formula::Proposition(symbol)
    }

    /// Negation of `formula`.
    pub fn not(formula: Self) -> Self {
        Formula::Negation(Box::new(formula))
    }

    /// Disjunction of `lhs` and `rhs`.
    pub fn or(lhs: Self, rhs: Self) -> Self {
        Formula::Or(Box::new((lhs, rhs)))
    }

    /// `formula` held at the previous observation, within `interval` time from now.
    pub fn previous(formula: Self, interval: Interval) -> Self {
        Formula::Previous(Box::new(formula), interval)
    }

    /// `formula` holds at the next observation, within `interval` time from now.
    pub fn next(formula: Self, interval: Interval) -> Self {
        Formula::Next(Box::new(formula), interval)
    }

    /// `lhs` since `rhs`, within `interval`.
    pub fn since(lhs: Self, rhs: Self, interval: Interval) -> Self {
        Formula::Since(Box::new((lhs, rhs)), interval)
    }

    /// `lhs` until `rhs`, within `interval`.
    pub fn until(lhs: Self, rhs: Self, interval: Interval) -> Self {
        Formula::Until(Box::new((lhs, rhs)), interval)
    }

    /// The interval of a temporal operator, or `None` for propositional formulae.
    pub fn interval(&self) -> Option<Interval> {
        match self {
            Formula::Proposition(_) | Formula::Negation(_) | Formula::Or(_) => None,
            Formula::Previous(_, interval)
            | Formula::Next(_, interval)
            | Formula::Since(_, interval)
            | Formula::Until(_, interval) => Some(*interval),
        }
    }

    /// Nesting depth of the formula, where propositions have depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Formula::Proposition(_) => 0,
            Formula::Negation(sub) | Formula::Previous(sub, _) | Formula::Next(sub, _) => {
                sub.depth() + 1
            }
            Formula::Or(subs) | Formula::Since(subs, _) | Formula::Until(subs, _) => {
                subs.0.depth().max(subs.1.depth()) + 1
            }
        }
    }
}

impl<S: Clone> Formula<S> {
    /// A copy of this formula with its interval replaced by `interval`.
    ///
    /// Propositional formulae have no interval and are returned unchanged.
    pub fn with_interval(&self, interval: Interval) -> Self {
        match self {
            Formula::Proposition(_) | Formula::Negation(_) | Formula::Or(_) => self.clone(),
            Formula::Previous(sub, _) => Formula::Previous(sub.clone(), interval),
            Formula::Next(sub, _) => Formula::Next(sub.clone(), interval),
            Formula::Since(subs, _) => Formula::Since(subs.clone(), interval),
            Formula::Until(subs, _) => Formula::Until(subs.clone(), interval),
        }
    }

    // Pre-order traversal: a node comes before its delay-copies,
    // which come before its subformulae.
    pub(crate) fn unroll(&self, table: &mut Vec<Formula<S>>) {
        table.push(self.clone());
        if let Some(mut interval) = self.interval() {
            while !interval.is_empty() {
                interval = interval.decrement();
                table.push(self.with_interval(interval));
            }
        }
        match self {
            Formula::Proposition(_) => {}
            Formula::Negation(sub) | Formula::Previous(sub, _) | Formula::Next(sub, _) => {
                sub.unroll(table)
            }
            Formula::Or(subs) | Formula::Since(subs, _) | Formula::Until(subs, _) => {
                subs.0.unroll(table);
                subs.1.unroll(table);
            }
        }
    }
}

impl<S: Display> Display for Formula<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Proposition(symbol) => write!(f, "x={symbol}"),
            Formula::Negation(sub) => write!(f, "NOT {sub}"),
            Formula::Or(subs) => write!(f, "{} OR {}", subs.0, subs.1),
            Formula::Previous(sub, interval) => write!(f, "PREVIOUS {sub} {interval}"),
            Formula::Next(sub, interval) => write!(f, "NEXT {sub} {interval}"),
            Formula::Since(subs, interval) => write!(f, "SINCE {} {interval} {}", subs.0, subs.1),
            Formula::Until(subs, interval) => write!(f, "UNTIL {} {interval} {}", subs.0, subs.1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn until() -> Formula<char> {
        Formula::until(Formula::atom('a'), Formula::atom('b'), Interval::new(0, 1))
    }

    #[test]
    fn structural_equality() {
        assert_eq!(until(), until());
        assert_ne!(until(), until().with_interval(Interval::new(0, 0)));
        assert_ne!(
            Formula::or(Formula::atom('a'), Formula::atom('b')),
            Formula::or(Formula::atom('b'), Formula::atom('a'))
        );
    }

    #[test]
    fn with_interval() {
        let copy = until().with_interval(Interval::new(0, 0));
        assert_eq!(copy.interval(), Some(Interval::new(0, 0)));
        assert_eq!(until().interval(), Some(Interval::new(0, 1)));
        let atom = Formula::atom('a');
        assert_eq!(atom.with_interval(Interval::new(1, 2)), atom);
    }

    #[test]
    fn unroll_order() {
        let mut table = Vec::new();
        until().unroll(&mut table);
        assert_eq!(
            table,
            vec![
                until(),
                until().with_interval(Interval::new(0, 0)),
                Formula::atom('a'),
                Formula::atom('b'),
            ]
        );
    }

    #[test]
    fn unroll_wide_interval() {
        let formula = Formula::next(
            Formula::previous(Formula::atom('a'), Interval::new(1, 2)),
            Interval::new(2, 4),
        );
        let mut table = Vec::new();
        formula.unroll(&mut table);
        // 1 + 4 copies of next, 1 + 2 copies of previous, 1 atom
        assert_eq!(table.len(), 9);
        assert_eq!(table[1].interval(), Some(Interval::new(1, 3)));
        assert_eq!(table[4].interval(), Some(Interval::new(0, 0)));
        assert_eq!(table[6].interval(), Some(Interval::new(0, 1)));
    }

    #[test]
    fn depth() {
        assert_eq!(Formula::atom('a').depth(), 0);
        assert_eq!(until().depth(), 1);
        assert_eq!(Formula::not(until()).depth(), 2);
    }

    #[test]
    fn display() {
        assert_eq!(until().to_string(), "UNTIL x=a [0-1] x=b");
        assert_eq!(
            Formula::not(Formula::or(Formula::atom('a'), Formula::atom('b'))).to_string(),
            "NOT x=a OR x=b"
        );
        assert_eq!(
            Formula::previous(Formula::atom('a'), Interval::new(1, 1)).to_string(),
            "PREVIOUS x=a [1-1]"
        );
    }
}
