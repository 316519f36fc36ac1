//! Concrete lattices over the provided value types.
//!
//! * [`ConceptLattice`]: formal concepts of a context, with extents kept up to date after every insertion.
//! * [`IntervalLattice`]: intervals closed under intersection.
//! * [`SetLattice`]: item sets closed under intersection.
//!
//! All three are forward lattices with an empty top label.
//! The underlying [`Lattice`] is available for traversals and order queries.

use crate::graph::VertexId;
use crate::order::{Concept, Interval, Poset};
use crate::{BitSet, Lattice, Result};

use log::trace;

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// A concept lattice over a fixed attribute universe.
///
/// Objects are inserted one at a time as single-object concepts.
/// After each insertion, the extent of every concept is the set of inserted objects whose intents contain the intent of the concept.
///
/// # Examples
///
/// ```
/// use concept_lattice::{BitSet, ConceptLattice};
///
/// let mut lattice = ConceptLattice::new(3);
/// lattice.insert_object(0, BitSet::from_indices(3, [0, 1]).unwrap()).unwrap();
/// lattice.insert_object(1, BitSet::from_indices(3, [0]).unwrap()).unwrap();
///
/// assert_eq!(lattice.len(), 3);
/// assert_eq!(lattice.support(&BitSet::from_indices(3, [0]).unwrap()), 2);
/// assert_eq!(lattice.support(&BitSet::from_indices(3, [0, 1]).unwrap()), 1);
/// assert_eq!(lattice.support(&BitSet::from_indices(3, [2]).unwrap()), 0);
/// ```
#[derive(Clone, Debug)]
pub struct ConceptLattice {
    lattice: Lattice<Concept>,
    attributes: usize,
}

impl ConceptLattice {
    /// Creates an empty lattice over an attribute universe of the given size.
    pub fn new(attributes: usize) -> Self {
        ConceptLattice { lattice: Lattice::new(Concept::top(attributes)), attributes }
    }

    /// Returns the size of the attribute universe.
    #[inline]
    pub fn attributes(&self) -> usize {
        self.attributes
    }

    /// Returns the number of concepts.
    #[inline]
    pub fn len(&self) -> usize {
        self.lattice.len()
    }

    /// Returns `true` if the lattice contains only the top concept.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lattice.is_empty()
    }

    /// Returns the lattice with the given maximum recursion depth for insertions.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.lattice = self.lattice.with_max_depth(max_depth);
        self
    }

    /// Returns the underlying lattice.
    #[inline]
    pub fn lattice(&self) -> &Lattice<Concept> {
        &self.lattice
    }

    /// Returns an iterator over the concepts.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> + '_ {
        self.lattice.labels()
    }

    /// Inserts the concept and adds its extent to every concept that generalizes it.
    ///
    /// Returns the vertex of the concept with the same intent.
    /// Returns an error if the intent is over a different attribute universe or if the insertion goes deeper than [`Lattice::max_depth`].
    /// Extents are only updated after a successful insertion, so the lattice is not modified if an error is returned.
    pub fn insert(&mut self, proposed: Concept) -> Result<VertexId> {
        let extent = proposed.extent().clone();
        let id = self.lattice.insert(proposed)?;
        self.propagate_extent(id, &extent);
        Ok(id)
    }

    /// Inserts a single object with the given intent.
    pub fn insert_object(&mut self, object: usize, intent: BitSet) -> Result<VertexId> {
        self.insert(Concept::object(object, intent))
    }

    // Floods the extent from the vertex towards more general concepts.
    fn propagate_extent(&mut self, from: VertexId, extent: &BitSet) {
        let general = self.lattice.direction().flip();
        let ids: Vec<VertexId> = self.lattice.iter(from, general).collect();
        trace!("Adding extent {} to {} concepts", extent, ids.len());
        let graph = self.lattice.graph_mut();
        for id in ids {
            if let Some(concept) = graph.label_mut(id) {
                concept.extend_extent(extent);
            }
        }
    }

    /// Returns the closure of the intent: the most general concept whose intent contains the given intent.
    ///
    /// Returns [`None`] if no concept contains it.
    pub fn concept_of(&self, intent: &BitSet) -> Option<&Concept> {
        let query = Concept::new(BitSet::new(), intent.clone());
        self.lattice.least_upper_bound(&query).and_then(|id| self.lattice.label(id))
    }

    /// Returns the number of objects whose intents contain the given intent.
    pub fn support(&self, intent: &BitSet) -> usize {
        self.concept_of(intent).map(|concept| concept.measure()).unwrap_or(0)
    }
}

//-----------------------------------------------------------------------------

/// A lattice of intervals closed under intersection.
///
/// Intervals on different dimensions generalize to the empty interval at the top.
///
/// # Examples
///
/// ```
/// use concept_lattice::{Interval, IntervalLattice};
///
/// let mut lattice = IntervalLattice::new();
/// lattice.insert(Interval::new(0, 10..20)).unwrap();
/// lattice.insert(Interval::new(0, 15..30)).unwrap();
/// assert_eq!(lattice.enclosing(&Interval::new(0, 16..18)), Some(&Interval::new(0, 15..20)));
/// assert_eq!(lattice.enclosing(&Interval::new(0, 5..25)), None);
/// ```
#[derive(Clone, Debug)]
pub struct IntervalLattice {
    lattice: Lattice<Interval>,
}

impl IntervalLattice {
    /// Creates an empty lattice.
    pub fn new() -> Self {
        IntervalLattice { lattice: Lattice::new(Interval::empty()) }
    }

    /// Returns the number of intervals, including the empty interval at the top.
    #[inline]
    pub fn len(&self) -> usize {
        self.lattice.len()
    }

    /// Returns `true` if only the empty interval is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lattice.is_empty()
    }

    /// Returns the underlying lattice.
    #[inline]
    pub fn lattice(&self) -> &Lattice<Interval> {
        &self.lattice
    }

    /// Returns an iterator over the stored intervals.
    pub fn intervals(&self) -> impl Iterator<Item = &Interval> + '_ {
        self.lattice.labels()
    }

    /// Inserts the interval and returns its vertex.
    pub fn insert(&mut self, interval: Interval) -> Result<VertexId> {
        self.lattice.insert(interval)
    }

    /// Returns the tightest stored interval containing the query, or [`None`] if there is no such interval.
    pub fn enclosing(&self, query: &Interval) -> Option<&Interval> {
        self.lattice.least_upper_bound(query).and_then(|id| self.lattice.label(id))
    }
}

impl Default for IntervalLattice {
    fn default() -> Self {
        Self::new()
    }
}

//-----------------------------------------------------------------------------

/// A lattice of item sets closed under intersection.
#[derive(Clone, Debug)]
pub struct SetLattice {
    lattice: Lattice<Poset>,
}

impl SetLattice {
    /// Creates an empty lattice over an item universe of the given size.
    pub fn new(universe: usize) -> Self {
        SetLattice { lattice: Lattice::new(Poset::empty(universe)) }
    }

    /// Returns the number of sets, including the empty set at the top.
    #[inline]
    pub fn len(&self) -> usize {
        self.lattice.len()
    }

    /// Returns `true` if only the empty set is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lattice.is_empty()
    }

    /// Returns the underlying lattice.
    #[inline]
    pub fn lattice(&self) -> &Lattice<Poset> {
        &self.lattice
    }

    /// Returns an iterator over the stored sets.
    pub fn sets(&self) -> impl Iterator<Item = &Poset> + '_ {
        self.lattice.labels()
    }

    /// Inserts the set and returns its vertex.
    pub fn insert(&mut self, set: Poset) -> Result<VertexId> {
        self.lattice.insert(set)
    }

    /// Inserts the set of the given items.
    ///
    /// Returns an error if an item is outside the universe.
    pub fn insert_items<I: IntoIterator<Item = usize>>(&mut self, items: I) -> Result<VertexId> {
        let universe = self.lattice.label(self.lattice.top()).map(|top| top.universe()).unwrap_or(0);
        self.insert(Poset::from_items(universe, items)?)
    }

    /// Returns the smallest stored superset of the query, or [`None`] if there is no such set.
    pub fn closure(&self, query: &Poset) -> Option<&Poset> {
        self.lattice.least_upper_bound(query).and_then(|id| self.lattice.label(id))
    }
}

//-----------------------------------------------------------------------------
