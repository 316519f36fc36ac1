//! Plain sets ordered by inclusion.

use super::{PartialOrder, Relation};
use crate::{BitSet, Result};

use std::fmt::Display;

//-----------------------------------------------------------------------------

/// A set of items from a fixed universe, ordered by inclusion.
///
/// # Examples
///
/// ```
/// use concept_lattice::{Poset, PartialOrder, Relation};
///
/// let a = Poset::from_items(4, [0, 1]).unwrap();
/// let b = Poset::from_items(4, [1, 2]).unwrap();
/// assert_eq!(a.relation(&b), Relation::NonComparable);
/// assert_eq!(a.intersect(&b).measure(), 1);
/// assert_eq!(a.union(&b).measure(), 3);
/// assert_eq!(a.intersect(&b).relation(&a), Relation::Less);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Poset {
    items: BitSet,
}

impl Poset {
    /// Creates an empty set over a universe of the given size.
    pub fn empty(universe: usize) -> Self {
        Poset { items: BitSet::with_len(universe) }
    }

    /// Creates a set over a universe of the given size from the given items.
    ///
    /// Returns an error if an item is outside the universe.
    pub fn from_items<I: IntoIterator<Item = usize>>(universe: usize, items: I) -> Result<Self> {
        Ok(Poset { items: BitSet::from_indices(universe, items)? })
    }

    /// Wraps an existing bit set.
    pub fn from_bits(items: BitSet) -> Self {
        Poset { items }
    }

    /// Returns the items.
    #[inline]
    pub fn items(&self) -> &BitSet {
        &self.items
    }

    /// Returns the size of the universe.
    #[inline]
    pub fn universe(&self) -> usize {
        self.items.universe()
    }

    /// Returns the intersection of the sets.
    pub fn intersect(&self, other: &Poset) -> Poset {
        Poset { items: self.items.intersection(&other.items) }
    }

    /// Returns the union of the sets.
    pub fn union(&self, other: &Poset) -> Poset {
        Poset { items: self.items.union(&other.items) }
    }

    /// Returns the number of items.
    #[inline]
    pub fn measure(&self) -> usize {
        self.items.count()
    }

    /// Compares the sets by inclusion.
    pub fn relation(&self, other: &Poset) -> Relation {
        let ours = self.items.is_subset(&other.items);
        let theirs = other.items.is_subset(&self.items);
        match (ours, theirs) {
            (true, true) => Relation::Equal,
            (true, false) => Relation::Less,
            (false, true) => Relation::Greater,
            (false, false) => Relation::NonComparable,
        }
    }
}

impl PartialOrder for Poset {
    fn relation(&self, other: &Self) -> Relation {
        Poset::relation(self, other)
    }

    fn lower_bound(&self, other: &Self) -> Option<Self> {
        Some(self.intersect(other))
    }

    fn upper_bound(&self, other: &Self) -> Option<Self> {
        Some(self.union(other))
    }

    fn measure(&self) -> usize {
        Poset::measure(self)
    }

    fn is_compatible(&self, other: &Self) -> bool {
        self.universe() == other.universe()
    }
}

impl Display for Poset {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.items)
    }
}

//-----------------------------------------------------------------------------
