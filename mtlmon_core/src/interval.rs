use crate::Time;
use std::fmt::Display;

/// A closed, bounded interval `[begin, end]` of time distances.
///
/// Intervals shrink by one unit per step through [`Interval::decrement`],
/// which is how bounded temporal operators get unrolled into delay-copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    begin: u32,
    end: u32,
}

impl Interval {
    /// Creates the interval `[begin, end]`.
    ///
    /// Panics if `begin > end`.
    #[inline(always)]
    pub fn new(begin: u32, end: u32) -> Self {
        assert!(begin <= end, "malformed interval [{begin}-{end}]");
        Self { begin, end }
    }

    /// Lower bound of the interval.
    #[inline(always)]
    pub fn begin(&self) -> u32 {
        self.begin
    }

    /// Upper bound of the interval.
    #[inline(always)]
    pub fn end(&self) -> u32 {
        self.end
    }

    /// The interval with both bounds lowered by one, clamped at zero.
    #[inline(always)]
    pub fn decrement(self) -> Self {
        Self {
            begin: self.begin.saturating_sub(1),
            end: self.end.saturating_sub(1),
        }
    }

    /// Whether the interval is `[0, 0]`, i.e., there is nothing left to unroll.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.begin == 0 && self.end == 0
    }

    /// Whether `value` lies within the bounds.
    #[inline(always)]
    pub fn contains(&self, value: Time) -> bool {
        Time::from(self.begin) <= value && value <= Time::from(self.end)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}-{}]", self.begin, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrement_to_empty() {
        let mut interval = Interval::new(2, 5);
        for _ in 0..5 {
            assert!(!interval.is_empty());
            interval = interval.decrement();
        }
        assert!(interval.is_empty());
        assert_eq!(interval.decrement(), Interval::new(0, 0));
    }

    #[test]
    fn decrement_clamps() {
        let interval = Interval::new(0, 3).decrement();
        assert_eq!(interval, Interval::new(0, 2));
        let mut interval = Interval::new(3, 3);
        for _ in 0..4 {
            interval = interval.decrement();
        }
        assert!(interval.is_empty());
    }

    #[test]
    fn contains() {
        let interval = Interval::new(1, 3);
        assert!(!interval.contains(-1));
        assert!(!interval.contains(0));
        assert!(interval.contains(1));
        assert!(interval.contains(3));
        assert!(!interval.contains(4));
        assert!(Interval::new(0, 0).contains(0));
    }

    #[test]
    #[should_panic]
    fn malformed() {
        let _ = Interval::new(2, 1);
    }

    #[test]
    fn display() {
        assert_eq!(Interval::new(0, 1).to_string(), "[0-1]");
    }
}
