//! Pruned graph traversals.
//!
//! A [`GraphIterator`] performs a depth-first walk from a seed vertex.
//! It asks a [`Pruner`] whether to expand each visited vertex and whether to follow each edge.
//! Every iterator gets its own color and keeps a private set of the vertices it has reached, so no vertex is reported twice.
//! Several iterators can walk the same graph at the same time.
//! The iterator is single-pass: walking the graph again requires a new iterator, which gets a new color.
//!
//! [`LatticePruner`] restricts the walk to one direction of the order of the labels, and [`HasseWriter`] writes the edges of a Hasse diagram as it walks.
//! The graph must not be modified while an iterator is alive, which the borrow checker enforces.

use crate::bitset::BitSet;
use crate::formats;
use crate::graph::{Color, Edge, Graph, VertexId};
use crate::order::{Direction, PartialOrder};

use std::io::{self, Write};


//-----------------------------------------------------------------------------

/// Callbacks that limit a [`GraphIterator`].
pub trait Pruner<L> {
    /// Returns `true` if the traversal should not follow any edges from the vertex.
    ///
    /// The vertex itself is still reported.
    fn prune_vertex(&mut self, _graph: &Graph<L>, _vertex: VertexId) -> bool {
        false
    }

    /// Returns `true` if the traversal should not follow the edge from `source`.
    fn prune_edge(&mut self, _graph: &Graph<L>, _source: VertexId, _edge: &Edge) -> bool {
        false
    }
}

/// A pruner that follows every edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoPruning;

impl<L> Pruner<L> for NoPruning {}

//-----------------------------------------------------------------------------

/// A depth-first traversal of the vertices reachable from a seed vertex.
///
/// # Examples
///
/// ```
/// use concept_lattice::Graph;
/// use concept_lattice::traversal::{GraphIterator, NoPruning};
///
/// let mut graph: Graph<char> = Graph::directed();
/// let a = graph.put_vertex('a', 1.0);
/// let b = graph.put_vertex('b', 1.0);
/// let c = graph.put_vertex_from(b, 'c', 1.0).unwrap();
/// graph.put_edge(c, a, 1.0).unwrap();
/// let d = graph.add_vertex('d');
///
/// let mut visited: Vec<usize> = GraphIterator::new(&graph, a, NoPruning).collect();
/// visited.sort();
/// assert_eq!(visited, vec![a, b, c]);
/// assert!(!visited.contains(&d));
/// ```
#[derive(Debug)]
pub struct GraphIterator<'a, L, P> {
    graph: &'a Graph<L>,
    pruner: P,
    color: Color,
    visited: BitSet,
    stack: Vec<VertexId>,
}

impl<'a, L, P: Pruner<L>> GraphIterator<'a, L, P> {
    /// Creates a new traversal from the seed vertex.
    ///
    /// The traversal is empty if the seed does not exist.
    pub fn new(graph: &'a Graph<L>, seed: VertexId, pruner: P) -> Self {
        let color = graph.new_color();
        let mut visited = BitSet::with_len(graph.capacity());
        let mut stack = Vec::new();
        if graph.contains(seed) {
            visited.insert(seed);
            graph.paint(seed, color);
            stack.push(seed);
        }
        GraphIterator { graph, pruner, color, visited, stack }
    }

    /// Returns the color of this traversal.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns `true` if the traversal has reached the vertex.
    #[inline]
    pub fn has_reached(&self, id: VertexId) -> bool {
        self.visited.contains(id)
    }

    /// Returns the pruner.
    #[inline]
    pub fn pruner(&self) -> &P {
        &self.pruner
    }

    /// Consumes the iterator and returns the pruner.
    pub fn into_pruner(self) -> P {
        self.pruner
    }
}

impl<'a, L, P: Pruner<L>> Iterator for GraphIterator<'a, L, P> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let vertex = self.stack.pop()?;
        let graph = self.graph;
        if !self.pruner.prune_vertex(graph, vertex) {
            for edge in graph.edges(vertex) {
                let target = edge.target();
                if !self.visited.contains(target) && !self.pruner.prune_edge(graph, vertex, edge) {
                    self.visited.insert(target);
                    graph.paint(target, self.color);
                    self.stack.push(target);
                }
            }
        }
        Some(vertex)
    }
}

//-----------------------------------------------------------------------------

/// A pruner that follows only edges to greater labels ([`Direction::Forward`]) or smaller labels ([`Direction::Reverse`]).
///
/// In a concept lattice, the forward direction leads to more specific concepts and the reverse direction to more general ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LatticePruner {
    direction: Direction,
}

impl LatticePruner {
    /// Creates a pruner for the given direction.
    pub fn new(direction: Direction) -> Self {
        LatticePruner { direction }
    }

    /// Returns the direction of the walk.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if the edge from `source` leads in the direction of the walk.
    pub fn follows<T: PartialOrder>(&self, graph: &Graph<T>, source: VertexId, target: VertexId) -> bool {
        match (graph.label(source), graph.label(target)) {
            (Some(from), Some(to)) => to.relation(from) == self.direction.ahead(),
            _ => false,
        }
    }
}

impl<T: PartialOrder> Pruner<T> for LatticePruner {
    fn prune_edge(&mut self, graph: &Graph<T>, source: VertexId, edge: &Edge) -> bool {
        !self.follows(graph, source, edge.target())
    }
}

//-----------------------------------------------------------------------------

/// A [`LatticePruner`] that writes the edges it walks in the DOT edge-list form.
///
/// Each visited vertex writes a line `"source-label" -> "target-label"` for every edge in the direction of the walk.
/// Edges are written even if the target has already been visited, so every edge between reachable vertices appears exactly once.
/// A flipped writer walks the same way but writes each edge as `"target-label" -> "source-label"`.
/// The first I/O error stops the output and is reported by [`HasseWriter::finish`].
pub struct HasseWriter<W, F> {
    pruner: LatticePruner,
    output: W,
    labeler: F,
    flipped: bool,
    edges: usize,
    error: Option<io::Error>,
}

impl<W: Write, F> HasseWriter<W, F> {
    /// Creates a writer that walks in the given direction and labels vertices with `labeler`.
    pub fn new(direction: Direction, output: W, labeler: F) -> Self {
        HasseWriter { pruner: LatticePruner::new(direction), output, labeler, flipped: false, edges: 0, error: None }
    }

    /// Returns a writer that writes the edges against the direction of the walk.
    pub fn flipped(self) -> Self {
        HasseWriter { flipped: !self.flipped, ..self }
    }

    /// Returns the number of edges written so far.
    #[inline]
    pub fn edges(&self) -> usize {
        self.edges
    }

    /// Consumes the writer and returns the number of edges written, or the first I/O error.
    pub fn finish(self) -> io::Result<usize> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.edges),
        }
    }
}

impl<T, W, F> Pruner<T> for HasseWriter<W, F>
where
    T: PartialOrder,
    W: Write,
    F: Fn(&T) -> String,
{
    fn prune_vertex(&mut self, graph: &Graph<T>, vertex: VertexId) -> bool {
        if self.error.is_some() {
            return true;
        }
        let source = &graph[vertex];
        let source_label = (self.labeler)(source.label());
        for edge in source.edges() {
            if !self.pruner.follows(graph, vertex, edge.target()) {
                continue;
            }
            let target_label = (self.labeler)(graph[edge.target()].label());
            let result = if self.flipped {
                formats::write_dot_edge(&target_label, &source_label, &mut self.output)
            } else {
                formats::write_dot_edge(&source_label, &target_label, &mut self.output)
            };
            if let Err(error) = result {
                self.error = Some(error);
                return true;
            }
            self.edges += 1;
        }
        false
    }

    fn prune_edge(&mut self, graph: &Graph<T>, source: VertexId, edge: &Edge) -> bool {
        self.pruner.prune_edge(graph, source, edge)
    }
}

//-----------------------------------------------------------------------------
