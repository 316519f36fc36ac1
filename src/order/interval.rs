//! Half-open intervals on numbered dimensions.

use super::{PartialOrder, Relation};

use std::fmt::Display;
use std::ops::Range;

//-----------------------------------------------------------------------------

/// A half-open interval `[start, end)` on a numbered dimension, such as a contig.
///
/// An interval that holds no value is dimensionless.
/// The constructor normalizes every empty range to the dimensionless empty interval.
/// Intervals are ordered by containment, with the empty interval below everything.
/// Intervals on different dimensions are not comparable.
///
/// # Examples
///
/// ```
/// use concept_lattice::{Interval, PartialOrder, Relation};
///
/// let a = Interval::new(1, 10..20);
/// let b = Interval::new(1, 15..30);
/// assert_eq!(a.intersect(&b), Interval::new(1, 15..20));
/// assert_eq!(a.union(&b), Some(Interval::new(1, 10..30)));
/// assert_eq!(a.relation(&a.union(&b).unwrap()), Relation::Less);
///
/// // Different dimensions.
/// let c = Interval::new(2, 10..20);
/// assert_eq!(a.relation(&c), Relation::NonComparable);
/// assert!(a.intersect(&c).is_empty());
/// assert_eq!(a.union(&c), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Interval {
    dimension: Option<usize>,
    range: Range<usize>,
}

impl Interval {
    /// Creates an interval on the given dimension.
    ///
    /// Returns the empty interval if the range is empty.
    pub fn new(dimension: usize, range: Range<usize>) -> Self {
        if range.start >= range.end {
            Self::empty()
        } else {
            Interval { dimension: Some(dimension), range }
        }
    }

    /// Returns the dimensionless empty interval.
    pub fn empty() -> Self {
        Interval { dimension: None, range: 0..0 }
    }

    /// Returns the dimension, or [`None`] for the empty interval.
    #[inline]
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Returns the range.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns `true` if the interval holds no value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dimension.is_none()
    }

    /// Returns `true` if this interval contains the other interval.
    pub fn contains(&self, other: &Interval) -> bool {
        if other.is_empty() {
            return true;
        }
        self.dimension == other.dimension && self.range.start <= other.range.start && other.range.end <= self.range.end
    }

    /// Returns `true` if the intervals are on the same dimension and overlap or are adjacent.
    pub fn is_connected(&self, other: &Interval) -> bool {
        !self.is_empty() && self.dimension == other.dimension &&
            self.range.start <= other.range.end && other.range.start <= self.range.end
    }

    /// Returns the intersection of the intervals.
    ///
    /// The result is empty if the intervals do not overlap.
    pub fn intersect(&self, other: &Interval) -> Interval {
        match (self.dimension, other.dimension) {
            (Some(ours), Some(theirs)) if ours == theirs => {
                let start = self.range.start.max(other.range.start);
                let end = self.range.end.min(other.range.end);
                Interval::new(ours, start..end)
            },
            _ => Interval::empty(),
        }
    }

    /// Returns the union of the intervals.
    ///
    /// Returns [`None`] if the intervals are not connected and the union is not an interval.
    pub fn union(&self, other: &Interval) -> Option<Interval> {
        if self.is_empty() {
            return Some(other.clone());
        }
        if other.is_empty() {
            return Some(self.clone());
        }
        if !self.is_connected(other) {
            return None;
        }
        let start = self.range.start.min(other.range.start);
        let end = self.range.end.max(other.range.end);
        Some(Interval { dimension: self.dimension, range: start..end })
    }

    /// Returns the length of the interval.
    #[inline]
    pub fn measure(&self) -> usize {
        self.range.end - self.range.start
    }

    /// Compares the intervals by containment.
    pub fn relation(&self, other: &Interval) -> Relation {
        match (self.contains(other), other.contains(self)) {
            (true, true) => Relation::Equal,
            (true, false) => Relation::Greater,
            (false, true) => Relation::Less,
            (false, false) => Relation::NonComparable,
        }
    }
}

impl PartialOrder for Interval {
    fn relation(&self, other: &Self) -> Relation {
        Interval::relation(self, other)
    }

    fn lower_bound(&self, other: &Self) -> Option<Self> {
        Some(self.intersect(other))
    }

    fn upper_bound(&self, other: &Self) -> Option<Self> {
        self.union(other)
    }

    fn measure(&self) -> usize {
        Interval::measure(self)
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.dimension {
            Some(dimension) => write!(f, "{}:{}-{}", dimension, self.range.start, self.range.end),
            None => write!(f, "empty"),
        }
    }
}

//-----------------------------------------------------------------------------
