//! Bit-encoded sets over an index space.
//!
//! A [`BitSet`] stores membership of objects or attributes by their indices.
//! The universe size is the length of the underlying [`RawVector`].
//! Object sets grow as objects are added, while attribute sets usually keep the size of a fixed attribute universe.

use crate::{LatticeError, Result};

use std::fmt::Display;
use std::hash::{Hash, Hasher};

use simple_sds::raw_vector::{AccessRaw, PushRaw, RawVector};

//-----------------------------------------------------------------------------

/// A growable set of indices stored as a bit vector.
///
/// Equality and hashing depend only on the members, not on the universe size.
/// Binary operations on sets with different universe sizes treat the missing positions as unset, and the result uses the larger universe.
///
/// # Examples
///
/// ```
/// use concept_lattice::BitSet;
///
/// let a = BitSet::from_indices(4, [0, 2]).unwrap();
/// let b = BitSet::from_indices(4, [2, 3]).unwrap();
/// assert_eq!(a.intersection(&b).iter().collect::<Vec<usize>>(), vec![2]);
/// assert_eq!(a.union(&b).count(), 3);
/// assert_eq!(a.complement().iter().collect::<Vec<usize>>(), vec![1, 3]);
/// assert!(BitSet::from_indices(4, [4]).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct BitSet {
    bits: RawVector,
}

impl BitSet {
    /// Creates an empty set with an empty universe.
    pub fn new() -> Self {
        BitSet { bits: RawVector::new() }
    }

    /// Creates an empty set over a universe of the given size.
    pub fn with_len(universe: usize) -> Self {
        BitSet { bits: RawVector::with_len(universe, false) }
    }

    /// Creates a set over a universe of the given size from the given indices.
    ///
    /// Returns an error if an index is outside the universe.
    pub fn from_indices<I: IntoIterator<Item = usize>>(universe: usize, indices: I) -> Result<Self> {
        let mut result = Self::with_len(universe);
        for index in indices {
            if index >= universe {
                return Err(LatticeError::OutOfUniverse { index, universe });
            }
            result.bits.set_bit(index, true);
        }
        Ok(result)
    }

    /// Returns the size of the universe.
    #[inline]
    pub fn universe(&self) -> usize {
        self.bits.len()
    }

    /// Returns the number of members.
    #[inline]
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Returns `true` if the set has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns `true` if the index is a member.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < self.universe() && self.bits.bit(index)
    }

    /// Extends the universe to at least the given size.
    pub fn grow(&mut self, universe: usize) {
        while self.bits.len() < universe {
            self.bits.push_bit(false);
        }
    }

    /// Adds the index to the set, growing the universe if necessary.
    pub fn insert(&mut self, index: usize) {
        self.grow(index + 1);
        self.bits.set_bit(index, true);
    }

    /// Removes the index from the set.
    pub fn remove(&mut self, index: usize) {
        if index < self.universe() {
            self.bits.set_bit(index, false);
        }
    }

    /// Returns an iterator over the members in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.universe()).filter(|&index| self.bits.bit(index))
    }

    /// Returns the largest member, or [`None`] if the set is empty.
    pub fn max(&self) -> Option<usize> {
        (0..self.universe()).rev().find(|&index| self.bits.bit(index))
    }

    /// Returns the union of the sets.
    pub fn union(&self, other: &BitSet) -> BitSet {
        let mut result = self.clone();
        result.grow(other.universe());
        for index in other.iter() {
            result.bits.set_bit(index, true);
        }
        result
    }

    /// Returns the intersection of the sets.
    pub fn intersection(&self, other: &BitSet) -> BitSet {
        let mut result = Self::with_len(self.universe().max(other.universe()));
        for index in self.iter().filter(|&index| other.contains(index)) {
            result.bits.set_bit(index, true);
        }
        result
    }

    /// Returns the complement of the set within its universe.
    pub fn complement(&self) -> BitSet {
        let mut result = Self::with_len(self.universe());
        for index in (0..self.universe()).filter(|&index| !self.bits.bit(index)) {
            result.bits.set_bit(index, true);
        }
        result
    }

    /// Returns `true` if every member of this set is also a member of the other set.
    pub fn is_subset(&self, other: &BitSet) -> bool {
        self.iter().all(|index| other.contains(index))
    }

    /// Returns a copy of the set with every member moved forward by `offset` positions.
    ///
    /// The universe of the result is `offset + universe`, or the universe of this set shifted by `offset` if larger.
    pub fn shifted(&self, offset: usize, universe: usize) -> BitSet {
        let mut result = Self::with_len(offset + universe.max(self.universe()));
        for index in self.iter() {
            result.bits.set_bit(offset + index, true);
        }
        result
    }

    /// Sets every position in the range to a member, growing the universe if necessary.
    pub fn fill(&mut self, range: std::ops::Range<usize>) {
        self.grow(range.end);
        for index in range {
            self.bits.set_bit(index, true);
        }
    }
}

impl Default for BitSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count() && self.is_subset(other)
    }
}

impl Eq for BitSet {}

impl Hash for BitSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for index in self.iter() {
            index.hash(state);
        }
    }
}

impl FromIterator<usize> for BitSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut result = BitSet::new();
        for index in iter {
            result.insert(index);
        }
        result
    }
}

impl Display for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, index) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, "}}")
    }
}

//-----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn members(set: &BitSet) -> Vec<usize> {
        set.iter().collect()
    }

    #[test]
    fn empty_sets() {
        let empty = BitSet::new();
        assert_eq!(empty.universe(), 0, "Wrong universe for an empty set");
        assert!(empty.is_empty(), "New set is not empty");
        assert_eq!(empty.max(), None, "Empty set has a maximum");

        let sized = BitSet::with_len(10);
        assert_eq!(sized.universe(), 10, "Wrong universe for a sized set");
        assert!(sized.is_empty(), "Sized set is not empty");
        assert_eq!(empty, sized, "Empty sets with different universes are not equal");
        assert_eq!(sized.complement().count(), 10, "Wrong complement of an empty set");
    }

    #[test]
    fn insert_and_remove() {
        let mut set = BitSet::with_len(3);
        set.insert(1);
        set.insert(7);
        assert_eq!(set.universe(), 8, "Insertion did not grow the universe");
        assert_eq!(members(&set), vec![1, 7], "Wrong members after insertion");
        assert_eq!(set.max(), Some(7), "Wrong maximum");
        set.remove(7);
        set.remove(100);
        assert_eq!(members(&set), vec![1], "Wrong members after removal");
        assert!(set.contains(1) && !set.contains(7) && !set.contains(100), "Wrong membership");
    }

    #[test]
    fn set_operations_with_different_universes() {
        let a = BitSet::from_indices(3, [0, 2]).unwrap();
        let b = BitSet::from_indices(6, [2, 5]).unwrap();

        let union = a.union(&b);
        assert_eq!(union.universe(), 6, "Wrong universe for the union");
        assert_eq!(members(&union), vec![0, 2, 5], "Wrong union");

        let intersection = a.intersection(&b);
        assert_eq!(intersection.universe(), 6, "Wrong universe for the intersection");
        assert_eq!(members(&intersection), vec![2], "Wrong intersection");

        assert!(intersection.is_subset(&a) && intersection.is_subset(&b), "Intersection is not a subset");
        assert!(!a.is_subset(&b), "Non-subset reported as a subset");
    }

    #[test]
    fn shift_and_fill() {
        let a = BitSet::from_indices(3, [0, 2]).unwrap();
        let shifted = a.shifted(4, 3);
        assert_eq!(shifted.universe(), 7, "Wrong universe for a shifted set");
        assert_eq!(members(&shifted), vec![4, 6], "Wrong shifted members");

        let mut filled = BitSet::with_len(2);
        filled.fill(3..5);
        assert_eq!(members(&filled), vec![3, 4], "Wrong members after fill");
    }

    #[test]
    fn collect_and_display() {
        let set: BitSet = [5, 1, 3].into_iter().collect();
        assert_eq!(set.universe(), 6, "Wrong universe for a collected set");
        assert_eq!(set.to_string(), "{1, 3, 5}", "Wrong string representation");
    }
}

//-----------------------------------------------------------------------------
