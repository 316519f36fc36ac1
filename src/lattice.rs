//! Incremental lattice construction.
//!
//! A [`Lattice`] stores a set of labels closed under generalization as the Hasse diagram of their order.
//! The diagram lives in an undirected [`Graph`], so every covering edge can be followed both ways.
//! The lattice direction decides which labels are more specific:
//!
//! * [`Direction::Forward`]: greater labels are more specific, and labels generalize with [`PartialOrder::lower_bound`].
//! * [`Direction::Reverse`]: smaller labels are more specific, and labels generalize with [`PartialOrder::upper_bound`].
//!
//! A label `x` dominates `y` if `x` is at least as specific as `y`.
//! The top vertex is created first and holds the most general label.
//! The bottom vertex is the most specific vertex inserted so far.
//! Sinks are the vertices without more specific neighbors.
//! The lattice keeps them in a list, which only changes when a label no vertex dominates is inserted.
//!
//! Insertion is incremental.
//! [`Lattice::insert`] finds the least vertex that dominates the new label, and [`Lattice::add_intent`] creates the new vertex together with every generalization that the closure requires.
//! Each insertion leaves a valid covering relation behind: no transitive edges and no missing edges between neighbors.
//! An insertion that fails is undone, so the lattice stays as it was before the call.

use crate::formats;
use crate::graph::{Graph, VertexId};
use crate::order::{Direction, PartialOrder, Relation};
use crate::traversal::{GraphIterator, HasseWriter, LatticePruner};
use crate::{LatticeError, Result};

use std::io::Write;

use log::{debug, trace};


//-----------------------------------------------------------------------------

/// A lattice of labels stored as a Hasse diagram.
///
/// # Examples
///
/// ```
/// use concept_lattice::{Lattice, Poset};
///
/// let mut lattice = Lattice::new(Poset::empty(3));
/// let ab = lattice.insert(Poset::from_items(3, [0, 1]).unwrap()).unwrap();
/// let bc = lattice.insert(Poset::from_items(3, [1, 2]).unwrap()).unwrap();
/// assert_ne!(ab, bc);
///
/// // The closure adds {1}.
/// assert_eq!(lattice.len(), 4);
/// let b = Poset::from_items(3, [1]).unwrap();
/// assert!(lattice.labels().any(|label| *label == b));
///
/// let join = lattice.join(lattice.label(ab).unwrap(), lattice.label(bc).unwrap()).unwrap();
/// assert_eq!(*join, b);
/// ```
#[derive(Clone, Debug)]
pub struct Lattice<T: PartialOrder> {
    graph: Graph<T>,
    top: VertexId,
    bottom: VertexId,
    sinks: Vec<VertexId>,
    direction: Direction,
    max_depth: usize,
    // Edges between existing vertices removed by the current insertion.
    removed: Vec<(VertexId, VertexId)>,
}

/// Construction and statistics.
impl<T: PartialOrder> Lattice<T> {
    /// Default maximum recursion depth in [`Lattice::add_intent`].
    pub const MAX_DEPTH: usize = 4096;

    /// Weight of covering edges.
    pub const DEFAULT_WEIGHT: f64 = Graph::<T>::DEFAULT_WEIGHT;

    /// Creates a forward lattice with the given top label.
    pub fn new(top: T) -> Self {
        Self::with_direction(top, Direction::Forward)
    }

    /// Creates a lattice with the given top label and direction.
    pub fn with_direction(top: T, direction: Direction) -> Self {
        let mut graph = Graph::undirected();
        let top = graph.add_vertex(top);
        Lattice {
            graph,
            top,
            bottom: top,
            sinks: vec![top],
            direction,
            max_depth: Self::MAX_DEPTH,
            removed: Vec::new(),
        }
    }

    /// Returns the lattice with the given maximum recursion depth for insertions.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the maximum recursion depth for insertions.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.graph.size()
    }

    /// Returns `true` if the lattice contains only the top vertex.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Returns the number of covering edges.
    #[inline]
    pub fn edges(&self) -> usize {
        self.graph.order()
    }

    /// Returns the direction of the lattice.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the top vertex.
    #[inline]
    pub fn top(&self) -> VertexId {
        self.top
    }

    /// Returns the bottom vertex.
    #[inline]
    pub fn bottom(&self) -> VertexId {
        self.bottom
    }

    /// Returns the label of the vertex, or [`None`] if there is no such vertex.
    #[inline]
    pub fn label(&self, id: VertexId) -> Option<&T> {
        self.graph.label(id)
    }

    /// Returns the underlying graph.
    #[inline]
    pub fn graph(&self) -> &Graph<T> {
        &self.graph
    }

    // Mutable access for the concrete lattices, which update labels in place.
    pub(crate) fn graph_mut(&mut self) -> &mut Graph<T> {
        &mut self.graph
    }

    /// Returns an iterator over the labels in vertex order.
    pub fn labels(&self) -> impl Iterator<Item = &T> + '_ {
        self.graph.vertices().map(|vertex| vertex.label())
    }

    /// Returns the vertices with no more specific neighbors.
    #[inline]
    pub fn sinks(&self) -> &[VertexId] {
        &self.sinks
    }

    // Returns a sink that dominates the label.
    fn dominating_sink(&self, label: &T) -> Option<VertexId> {
        self.sinks.iter().copied().find(|&sink| self.dominates(self.graph[sink].label(), label))
    }
}

//-----------------------------------------------------------------------------

/// Order in the lattice direction.
impl<T: PartialOrder> Lattice<T> {
    /// Returns `true` if `x` is at least as specific as `y`.
    pub fn dominates(&self, x: &T, y: &T) -> bool {
        let relation = x.relation(y);
        relation == Relation::Equal || relation == self.direction.ahead()
    }

    /// Returns `true` if `x` is strictly more specific than `y`.
    pub fn strictly_dominates(&self, x: &T, y: &T) -> bool {
        x.relation(y) == self.direction.ahead()
    }

    /// Returns the most specific label that both labels dominate.
    pub fn generalize(&self, x: &T, y: &T) -> Option<T> {
        match self.direction {
            Direction::Forward => x.lower_bound(y),
            Direction::Reverse => x.upper_bound(y),
        }
    }

    /// Returns the most general label that dominates both labels.
    pub fn specialize(&self, x: &T, y: &T) -> Option<T> {
        match self.direction {
            Direction::Forward => x.upper_bound(y),
            Direction::Reverse => x.lower_bound(y),
        }
    }

    fn vertex_dominates(&self, x: VertexId, y: VertexId) -> bool {
        self.dominates(self.graph[x].label(), self.graph[y].label())
    }

    fn generalize_or_err(&self, x: &T, y: &T) -> Result<T> {
        self.generalize(x, y).ok_or_else(|| {
            LatticeError::InvariantViolation(format!("No generalization of {:?} and {:?}", x, y))
        })
    }
}

//-----------------------------------------------------------------------------

/// Insertion.
impl<T: PartialOrder> Lattice<T> {
    /// Returns the least vertex that dominates `proposed`, starting from `generator`.
    ///
    /// The generator must dominate `proposed`.
    /// The search moves to a more general neighbor as long as that neighbor still dominates `proposed`.
    pub fn supremum(&self, proposed: &T, generator: VertexId) -> VertexId {
        let mut generator = generator;
        'climb: loop {
            let current = self.graph[generator].label();
            for neighbor in self.graph.neighbors(generator) {
                let label = self.graph[neighbor].label();
                if !self.dominates(label, current) && self.dominates(label, proposed) {
                    trace!("Supremum: moving from vertex {} to vertex {}", generator, neighbor);
                    generator = neighbor;
                    continue 'climb;
                }
            }
            return generator;
        }
    }

    /// Inserts `proposed` below `generator` and returns the vertex with that label.
    ///
    /// If a vertex with an equivalent label already exists, no vertex is created.
    /// Otherwise the new vertex gets the generalization of the generator label and `proposed` as its label.
    /// Missing generalizations of `proposed` with the existing labels are inserted recursively before the new vertex is linked.
    ///
    /// Returns an error if the generator does not exist, if the label is not compatible with the top label, or if the generator does not dominate `proposed`.
    /// Also returns an error if the recursion goes deeper than [`Lattice::max_depth`].
    /// The lattice is not modified if an error is returned.
    pub fn add_intent(&mut self, proposed: T, generator: VertexId) -> Result<VertexId> {
        let generator_label = self.graph.label(generator).ok_or(LatticeError::NoSuchVertex(generator))?;
        if !self.graph[self.top].label().is_compatible(&proposed) {
            return Err(LatticeError::Incompatible(format!("{:?}", proposed)));
        }
        if !self.dominates(generator_label, &proposed) {
            return Err(LatticeError::InvariantViolation(format!(
                "Vertex {} does not dominate {:?}", generator, proposed
            )));
        }
        self.atomic(|lattice| lattice.add_intent_at(proposed, generator, 0))
    }

    // The generator must exist and dominate `proposed`.
    fn add_intent_at(&mut self, proposed: T, generator: VertexId, depth: usize) -> Result<VertexId> {
        if depth > self.max_depth {
            return Err(LatticeError::RecursionLimit(self.max_depth));
        }

        let generator = self.supremum(&proposed, generator);
        {
            let label = self.graph[generator].label();
            if self.dominates(label, &proposed) && self.dominates(&proposed, label) {
                return Ok(generator);
            }
        }

        // Most specific candidates among the generalizations of the more general neighbors.
        let neighbors: Vec<VertexId> = self.graph.neighbors(generator).collect();
        let mut parents: Vec<VertexId> = Vec::new();
        for target in neighbors {
            if self.vertex_dominates(target, generator) {
                continue;
            }
            let target_label = self.graph[target].label();
            let candidate = if target_label.relation(&proposed) == Relation::NonComparable {
                let generalized = self.generalize_or_err(target_label, &proposed)?;
                self.add_intent_at(generalized, target, depth + 1)?
            } else {
                target
            };
            self.add_parent(&mut parents, candidate);
        }

        let label = self.generalize_or_err(self.graph[generator].label(), &proposed)?;
        let child = self.graph.put_vertex_from(generator, label, Self::DEFAULT_WEIGHT)?;
        debug!("Created vertex {} above vertex {} with {} parents", child, generator, parents.len());
        for parent in parents {
            if parent == generator {
                continue;
            }
            if self.graph.has_edge(parent, generator) {
                trace!("Removing edge {} -- {}", parent, generator);
                self.graph.delete_edge(parent, generator)?;
                self.removed.push((parent, generator));
            }
            trace!("Adding edge {} -- {}", parent, child);
            self.graph.put_edge(parent, child, Self::DEFAULT_WEIGHT)?;
        }
        self.update_bottom(child);

        Ok(child)
    }

    /// Inserts the label and returns the vertex with that label.
    ///
    /// Returns an error if the label is not compatible with the top label or if the recursion goes deeper than [`Lattice::max_depth`].
    /// The lattice is not modified if an error is returned.
    pub fn insert(&mut self, proposed: T) -> Result<VertexId> {
        if !self.graph[self.top].label().is_compatible(&proposed) {
            return Err(LatticeError::Incompatible(format!("{:?}", proposed)));
        }
        self.atomic(|lattice| {
            if lattice.dominates(lattice.graph[lattice.bottom].label(), &proposed) {
                return lattice.add_intent_at(proposed, lattice.bottom, 0);
            }
            match lattice.dominating_sink(&proposed) {
                Some(sink) => lattice.add_intent_at(proposed, sink, 0),
                None => lattice.add_maximal(proposed),
            }
        })
    }

    // Runs the insertion and undoes its changes if it fails.
    fn atomic<F>(&mut self, insertion: F) -> Result<VertexId>
    where
        F: FnOnce(&mut Self) -> Result<VertexId>,
    {
        let capacity = self.graph.capacity();
        let bottom = self.bottom;
        let sinks = self.sinks.clone();
        self.removed.clear();

        match insertion(self) {
            Ok(id) => {
                self.removed.clear();
                Ok(id)
            },
            Err(error) => {
                debug!("Undoing a failed insertion: {}", error);
                self.rollback(capacity)?;
                self.bottom = bottom;
                self.sinks = sinks;
                Err(error)
            },
        }
    }

    // Deletes the vertices created after the arena had the given capacity and restores the removed edges.
    // Edges created by the insertion always have a new endpoint, so they disappear with the new vertices.
    fn rollback(&mut self, capacity: usize) -> Result<()> {
        for id in (capacity..self.graph.capacity()).rev() {
            if self.graph.contains(id) {
                self.graph.delete_vertex(id)?;
            }
        }
        let removed = std::mem::take(&mut self.removed);
        for (parent, child) in removed {
            if parent < capacity && child < capacity {
                trace!("Restoring edge {} -- {}", parent, child);
                self.graph.put_edge(parent, child, Self::DEFAULT_WEIGHT)?;
            }
        }
        Ok(())
    }

    // Inserts a label that no vertex dominates as a new sink.
    // Insertions below existing vertices never change the sinks, so this is the only place that updates them.
    fn add_maximal(&mut self, proposed: T) -> Result<VertexId> {
        let mut parents: Vec<VertexId> = Vec::new();
        let sinks = self.sinks.clone();
        for sink in sinks {
            let sink_label = self.graph[sink].label();
            let candidate = if self.dominates(&proposed, sink_label) {
                sink
            } else {
                let generalized = self.generalize_or_err(sink_label, &proposed)?;
                self.add_intent_at(generalized, sink, 1)?
            };
            self.add_parent(&mut parents, candidate);
        }

        let child = self.graph.add_vertex(proposed);
        debug!("Created maximal vertex {} with {} parents", child, parents.len());
        for parent in parents {
            trace!("Adding edge {} -- {}", parent, child);
            self.graph.put_edge(parent, child, Self::DEFAULT_WEIGHT)?;
        }
        let graph = &self.graph;
        let direction = self.direction;
        self.sinks.retain(|&sink| graph[child].label().relation(graph[sink].label()) != direction.ahead());
        self.sinks.push(child);
        self.update_bottom(child);

        Ok(child)
    }

    // Adds the candidate unless a parent dominates it, and drops the parents it dominates.
    fn add_parent(&self, parents: &mut Vec<VertexId>, candidate: VertexId) {
        if parents.iter().any(|&parent| self.vertex_dominates(parent, candidate)) {
            return;
        }
        parents.retain(|&parent| !self.vertex_dominates(candidate, parent));
        parents.push(candidate);
    }

    fn update_bottom(&mut self, id: VertexId) {
        if self.strictly_dominates(self.graph[id].label(), self.graph[self.bottom].label()) {
            debug!("Bottom moved from vertex {} to vertex {}", self.bottom, id);
            self.bottom = id;
        }
    }
}

//-----------------------------------------------------------------------------

/// Queries.
impl<T: PartialOrder> Lattice<T> {
    /// Returns the least vertex that dominates the query, or [`None`] if no vertex does.
    pub fn least_upper_bound(&self, query: &T) -> Option<VertexId> {
        let start = if self.dominates(self.graph[self.bottom].label(), query) {
            Some(self.bottom)
        } else {
            self.dominating_sink(query)
        };
        start.map(|generator| self.supremum(query, generator))
    }

    /// Returns the least stored label that dominates the generalization of the labels.
    pub fn join(&self, a: &T, b: &T) -> Option<&T> {
        let query = self.generalize(a, b)?;
        self.least_upper_bound(&query).and_then(|id| self.graph.label(id))
    }

    /// Returns the least stored label that dominates the specialization of the labels.
    pub fn meet(&self, a: &T, b: &T) -> Option<&T> {
        let query = self.specialize(a, b)?;
        self.least_upper_bound(&query).and_then(|id| self.graph.label(id))
    }

    /// Returns `join(a, b).measure() / meet(b, top).measure()`.
    ///
    /// Returns an error if either bound is missing or if the denominator is zero.
    pub fn measure(&self, a: &T, b: &T) -> Result<f64> {
        let join = self.join(a, b).ok_or_else(|| {
            LatticeError::Incompatible(format!("No join of {:?} and {:?}", a, b))
        })?;
        let top = self.graph[self.top].label();
        let meet = self.meet(b, top).ok_or_else(|| {
            LatticeError::Incompatible(format!("No meet of {:?} and the top", b))
        })?;
        let denominator = meet.measure();
        if denominator == 0 {
            return Err(LatticeError::DivisionByZero(format!("Measure of the meet of {:?} and the top", b)));
        }
        Ok(join.measure() as f64 / denominator as f64)
    }

    /// Returns a traversal from the vertex that follows the edges in the given direction.
    ///
    /// The traversal follows the order of the labels, not the lattice direction.
    pub fn iter(&self, from: VertexId, direction: Direction) -> GraphIterator<'_, T, LatticePruner> {
        GraphIterator::new(&self.graph, from, LatticePruner::new(direction))
    }

    /// Writes the Hasse diagram in the DOT format.
    ///
    /// Edges point from the more general label to the more specific one, or the other way if `reverse` is set.
    /// Returns the number of edges written.
    pub fn write_dot<W: Write, F: Fn(&T) -> String>(&self, output: &mut W, reverse: bool, labeler: F) -> Result<usize> {
        formats::write_dot_header(output)?;
        let mut writer = HasseWriter::new(self.direction, &mut *output, labeler);
        if reverse {
            writer = writer.flipped();
        }
        let mut iter = GraphIterator::new(&self.graph, self.top, writer);
        iter.by_ref().for_each(drop);
        let edges = iter.into_pruner().finish()?;
        formats::write_dot_footer(output)?;
        Ok(edges)
    }
}

//-----------------------------------------------------------------------------
