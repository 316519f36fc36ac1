//! Formal concepts.

use super::{PartialOrder, Relation};
use crate::BitSet;

use std::fmt::Display;

//-----------------------------------------------------------------------------

/// A formal concept: a set of objects (extent) and a set of attributes (intent).
///
/// Concepts are ordered by intent inclusion only.
/// A concept with a smaller intent is more general and ranks [`Relation::Less`].
/// The extent is not part of the order, as a lattice accumulates it incrementally.
///
/// The pointwise operations are named by their effect on the extent:
/// [`Concept::union`] unites the extents and intersects the intents (generalization), and [`Concept::intersect`] does the opposite (specialization).
///
/// # Examples
///
/// ```
/// use concept_lattice::{BitSet, Concept, PartialOrder, Relation};
///
/// let general = Concept::new(BitSet::from_indices(2, [0, 1]).unwrap(), BitSet::from_indices(3, [0]).unwrap());
/// let specific = Concept::new(BitSet::from_indices(2, [0]).unwrap(), BitSet::from_indices(3, [0, 1]).unwrap());
/// assert_eq!(general.relation(&specific), Relation::Less);
/// assert_eq!(specific.relation(&general), Relation::Greater);
///
/// let union = specific.union(&general);
/// assert_eq!(union.intent(), general.intent());
/// assert_eq!(union.measure(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Concept {
    extent: BitSet,
    intent: BitSet,
}

impl Concept {
    /// Creates a concept from an extent and an intent.
    pub fn new(extent: BitSet, intent: BitSet) -> Self {
        Concept { extent, intent }
    }

    /// Returns the most general concept over an attribute universe of the given size.
    ///
    /// The concept has an empty intent and an empty extent.
    pub fn top(attributes: usize) -> Self {
        Concept { extent: BitSet::new(), intent: BitSet::with_len(attributes) }
    }

    /// Returns a concept for a single object with the given intent.
    pub fn object(object: usize, intent: BitSet) -> Self {
        let mut extent = BitSet::with_len(object + 1);
        extent.insert(object);
        Concept { extent, intent }
    }

    /// Returns the extent.
    #[inline]
    pub fn extent(&self) -> &BitSet {
        &self.extent
    }

    /// Returns the intent.
    #[inline]
    pub fn intent(&self) -> &BitSet {
        &self.intent
    }

    // Adds the objects to the extent.
    pub(crate) fn extend_extent(&mut self, objects: &BitSet) {
        self.extent = self.extent.union(objects);
    }

    /// Returns the generalization of the concepts: extents united, intents intersected.
    pub fn union(&self, other: &Concept) -> Concept {
        Concept {
            extent: self.extent.union(&other.extent),
            intent: self.intent.intersection(&other.intent),
        }
    }

    /// Returns the specialization of the concepts: extents intersected, intents united.
    pub fn intersect(&self, other: &Concept) -> Concept {
        Concept {
            extent: self.extent.intersection(&other.extent),
            intent: self.intent.union(&other.intent),
        }
    }

    /// Returns the number of objects in the extent.
    #[inline]
    pub fn measure(&self) -> usize {
        self.extent.count()
    }

    /// Compares the intents of the concepts.
    pub fn relation(&self, other: &Concept) -> Relation {
        let meet = self.intent.intersection(&other.intent);
        if self.intent == other.intent {
            Relation::Equal
        } else if self.intent == meet {
            Relation::Less
        } else if other.intent == meet {
            Relation::Greater
        } else {
            Relation::NonComparable
        }
    }
}

impl PartialOrder for Concept {
    fn relation(&self, other: &Self) -> Relation {
        Concept::relation(self, other)
    }

    fn lower_bound(&self, other: &Self) -> Option<Self> {
        Some(self.union(other))
    }

    fn upper_bound(&self, other: &Self) -> Option<Self> {
        Some(self.intersect(other))
    }

    fn measure(&self) -> usize {
        Concept::measure(self)
    }

    fn is_compatible(&self, other: &Self) -> bool {
        self.intent.universe() == other.intent.universe()
    }
}

impl Display for Concept {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.extent, self.intent)
    }
}

//-----------------------------------------------------------------------------
