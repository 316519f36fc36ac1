//! A labeled multigraph stored as an arena of vertices.
//!
//! Vertices are identified by their offsets in the arena and never move.
//! Deleting a vertex leaves a hole, so identifiers of the remaining vertices stay valid.
//! Each vertex stores its outgoing edges as `(target, weight)` pairs.
//! In an undirected graph, every edge is stored in both directions, which still allows directed traversal filters.
//!
//! The graph uses the following counts:
//!
//! * [`Graph::size`]: the number of vertices.
//! * [`Graph::order`]: the number of edges. An undirected edge counts once.
//!
//! Vertices also carry a color for traversals.
//! A traversal asks for a fresh color with [`Graph::new_color`] and paints the vertices it visits.
//! Colors only increase, so the marks of earlier traversals never need to be cleared.
//! The color of a vertex only records the last traversal that reached it.
//! Traversals that may overlap keep their own visited sets.

use crate::{LatticeError, Result};

use std::cell::Cell;
use std::ops::Index;

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// Vertex identifier: offset in the arena.
pub type VertexId = usize;

/// Traversal color.
pub type Color = u64;

/// An outgoing edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    target: VertexId,
    weight: f64,
}

impl Edge {
    /// Returns the target vertex.
    #[inline]
    pub fn target(&self) -> VertexId {
        self.target
    }

    /// Returns the weight of the edge.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

//-----------------------------------------------------------------------------

/// A vertex owned by a [`Graph`].
#[derive(Clone, Debug)]
pub struct Vertex<L> {
    id: VertexId,
    label: L,
    color: Cell<Color>,
    edges: Vec<Edge>,
    in_degree: usize,
    out_degree: usize,
}

impl<L> Vertex<L> {
    fn new(id: VertexId, label: L) -> Self {
        Vertex { id, label, color: Cell::new(0), edges: Vec::new(), in_degree: 0, out_degree: 0 }
    }

    /// Returns the identifier of the vertex.
    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Returns the label of the vertex.
    #[inline]
    pub fn label(&self) -> &L {
        &self.label
    }

    /// Returns the color of the last traversal that visited the vertex.
    #[inline]
    pub fn color(&self) -> Color {
        self.color.get()
    }

    /// Returns the outgoing edges.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the number of incoming edges.
    #[inline]
    pub fn in_degree(&self) -> usize {
        self.in_degree
    }

    /// Returns the number of outgoing edges.
    #[inline]
    pub fn out_degree(&self) -> usize {
        self.out_degree
    }

    // Records an outgoing edge. The graph updates the in-degree of the target.
    fn adopt(&mut self, target: VertexId, weight: f64) {
        self.edges.push(Edge { target, weight });
        self.out_degree += 1;
    }

    // Removes all outgoing edges to the target and returns their number.
    fn orphan(&mut self, target: VertexId) -> usize {
        let before = self.edges.len();
        self.edges.retain(|edge| edge.target != target);
        let removed = before - self.edges.len();
        self.out_degree -= removed;
        removed
    }
}

//-----------------------------------------------------------------------------

/// A labeled multigraph with weighted edges.
///
/// The first vertex becomes the root of the graph.
/// [`Graph::put_vertex`] attaches new vertices to the root.
///
/// # Examples
///
/// ```
/// use concept_lattice::Graph;
///
/// let mut graph: Graph<&str> = Graph::undirected();
/// let root = graph.put_vertex("root", 1.0);
/// let child = graph.put_vertex("child", 1.0);
/// let grandchild = graph.put_vertex_from(child, "grandchild", 2.0).unwrap();
/// assert_eq!(graph.size(), 3);
/// assert_eq!(graph.order(), 2);
/// assert!(graph.has_edge(root, child) && graph.has_edge(child, root));
///
/// assert_eq!(graph.delete_edge(child, grandchild).unwrap(), 1);
/// assert_eq!(graph.order(), 1);
/// assert!(!graph.has_edge(grandchild, child));
/// ```
#[derive(Clone, Debug)]
pub struct Graph<L> {
    vertices: Vec<Option<Vertex<L>>>,
    root: Option<VertexId>,
    directed: bool,
    size: usize,
    order: usize,
    generation: Cell<Color>,
}

/// Construction and statistics.
impl<L> Graph<L> {
    /// Creates an empty graph.
    pub fn new(directed: bool) -> Self {
        Graph {
            vertices: Vec::new(),
            root: None,
            directed,
            size: 0,
            order: 0,
            generation: Cell::new(0),
        }
    }

    /// Creates an empty directed graph.
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// Creates an empty undirected graph.
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Returns `true` if the graph is directed.
    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of edges.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the length of the arena, including the holes left by deleted vertices.
    ///
    /// All vertex identifiers are smaller than this.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the root vertex, or [`None`] if the graph is empty.
    #[inline]
    pub fn root(&self) -> Option<VertexId> {
        self.root
    }
}

/// Vertex and edge access.
impl<L> Graph<L> {
    /// Returns `true` if the vertex exists.
    #[inline]
    pub fn contains(&self, id: VertexId) -> bool {
        self.vertex(id).is_some()
    }

    /// Returns the vertex, or [`None`] if it does not exist.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<L>> {
        self.vertices.get(id).and_then(|vertex| vertex.as_ref())
    }

    fn vertex_mut(&mut self, id: VertexId) -> Result<&mut Vertex<L>> {
        self.vertices.get_mut(id).and_then(|vertex| vertex.as_mut()).ok_or(LatticeError::NoSuchVertex(id))
    }

    /// Returns the label of the vertex, or [`None`] if it does not exist.
    #[inline]
    pub fn label(&self, id: VertexId) -> Option<&L> {
        self.vertex(id).map(|vertex| vertex.label())
    }

    /// Returns a mutable reference to the label of the vertex, or [`None`] if it does not exist.
    pub fn label_mut(&mut self, id: VertexId) -> Option<&mut L> {
        self.vertices.get_mut(id).and_then(|vertex| vertex.as_mut()).map(|vertex| &mut vertex.label)
    }

    /// Returns the outgoing edges of the vertex.
    ///
    /// Returns an empty slice if the vertex does not exist.
    pub fn edges(&self, id: VertexId) -> &[Edge] {
        self.vertex(id).map(|vertex| vertex.edges()).unwrap_or(&[])
    }

    /// Returns an iterator over the targets of the outgoing edges of the vertex.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.edges(id).iter().map(|edge| edge.target)
    }

    /// Returns `true` if there is an edge from `source` to `target`.
    pub fn has_edge(&self, source: VertexId, target: VertexId) -> bool {
        self.edges(source).iter().any(|edge| edge.target == target)
    }

    /// Returns an iterator over the identifiers of the existing vertices.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter().enumerate().filter_map(|(id, vertex)| vertex.as_ref().map(|_| id))
    }

    /// Returns an iterator over the existing vertices.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<L>> + '_ {
        self.vertices.iter().flatten()
    }
}

/// Mutation.
impl<L> Graph<L> {
    /// Default weight for edges created without an explicit weight.
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    /// Creates an isolated vertex and returns its identifier.
    ///
    /// The vertex becomes the root if the graph has no root.
    pub fn add_vertex(&mut self, label: L) -> VertexId {
        let id = self.vertices.len();
        self.vertices.push(Some(Vertex::new(id, label)));
        self.size += 1;
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Creates a vertex attached to the root and returns its identifier.
    ///
    /// If the graph has no root, the new vertex becomes the root.
    pub fn put_vertex(&mut self, label: L, weight: f64) -> VertexId {
        match self.root {
            Some(root) => {
                let id = self.add_vertex(label);
                self.link(root, id, weight);
                id
            },
            None => self.add_vertex(label),
        }
    }

    /// Creates a vertex attached to the given source vertex and returns its identifier.
    ///
    /// Returns an error if the source does not exist.
    pub fn put_vertex_from(&mut self, source: VertexId, label: L, weight: f64) -> Result<VertexId> {
        if !self.contains(source) {
            return Err(LatticeError::NoSuchVertex(source));
        }
        let id = self.add_vertex(label);
        self.link(source, id, weight);
        Ok(id)
    }

    /// Adds an edge from `source` to `target`, and from `target` to `source` in an undirected graph.
    ///
    /// Returns an error if either vertex does not exist or if the edge would be a self-loop.
    pub fn put_edge(&mut self, source: VertexId, target: VertexId, weight: f64) -> Result<()> {
        if !self.contains(source) {
            return Err(LatticeError::NoSuchVertex(source));
        }
        if !self.contains(target) {
            return Err(LatticeError::NoSuchVertex(target));
        }
        if source == target {
            return Err(LatticeError::InvariantViolation(format!("Self-loop at vertex {}", source)));
        }
        self.link(source, target, weight);
        Ok(())
    }

    /// Removes all edges from `source` to `target`, and from `target` to `source` in an undirected graph.
    ///
    /// Returns the number of removed edges from `source` to `target`, or an error if there were none.
    /// If `source` was the root, `target` becomes the new root.
    pub fn delete_edge(&mut self, source: VertexId, target: VertexId) -> Result<usize> {
        if !self.contains(target) {
            return Err(LatticeError::NoSuchVertex(target));
        }
        let removed = self.unlink(source, target)?;
        if removed == 0 {
            return Err(LatticeError::NoSuchEdge { from: source, to: target });
        }
        if !self.directed {
            self.unlink(target, source)?;
        }
        self.order -= removed;
        if self.root == Some(source) {
            self.root = Some(target);
        }
        Ok(removed)
    }

    /// Deletes the vertex and all edges incident to it, and returns its label.
    ///
    /// If the vertex was the root, the root moves to the first remaining vertex.
    pub fn delete_vertex(&mut self, id: VertexId) -> Result<L> {
        let vertex = self.vertices.get_mut(id).and_then(|vertex| vertex.take()).ok_or(LatticeError::NoSuchVertex(id))?;
        let mut records = vertex.edges.len();
        for edge in vertex.edges.iter() {
            if let Some(Some(target)) = self.vertices.get_mut(edge.target) {
                target.in_degree -= 1;
            }
        }
        for other in self.vertices.iter_mut().flatten() {
            records += other.orphan(id);
        }
        self.order -= if self.directed { records } else { records / 2 };
        self.size -= 1;
        if self.root == Some(id) {
            let first = self.vertex_ids().next();
            self.root = first;
        }
        Ok(vertex.label)
    }

    // Adds the edge and its reverse in an undirected graph. Both endpoints must exist.
    fn link(&mut self, source: VertexId, target: VertexId, weight: f64) {
        self.adopt(source, target, weight);
        if !self.directed {
            self.adopt(target, source, weight);
        }
        self.order += 1;
    }

    fn adopt(&mut self, source: VertexId, target: VertexId, weight: f64) {
        if let Some(Some(vertex)) = self.vertices.get_mut(source) {
            vertex.adopt(target, weight);
        }
        if let Some(Some(vertex)) = self.vertices.get_mut(target) {
            vertex.in_degree += 1;
        }
    }

    // Removes the edges from `source` to `target` in one direction.
    fn unlink(&mut self, source: VertexId, target: VertexId) -> Result<usize> {
        let removed = self.vertex_mut(source)?.orphan(target);
        self.vertex_mut(target)?.in_degree -= removed;
        Ok(removed)
    }
}

/// Colors.
impl<L> Graph<L> {
    /// Returns a color that no vertex has been painted with.
    pub fn new_color(&self) -> Color {
        let color = self.generation.get() + 1;
        self.generation.set(color);
        color
    }

    /// Paints the vertex with the given color.
    ///
    /// Does nothing if the vertex does not exist.
    pub fn paint(&self, id: VertexId, color: Color) {
        if let Some(vertex) = self.vertex(id) {
            vertex.color.set(color);
        }
    }

    /// Returns `true` if the vertex has been painted with the given color.
    #[inline]
    pub fn is_painted(&self, id: VertexId, color: Color) -> bool {
        self.vertex(id).map(|vertex| vertex.color() == color).unwrap_or(false)
    }
}

impl<L> Index<VertexId> for Graph<L> {
    type Output = Vertex<L>;

    fn index(&self, id: VertexId) -> &Self::Output {
        match self.vertex(id) {
            Some(vertex) => vertex,
            None => panic!("Vertex {} does not exist", id),
        }
    }
}

//-----------------------------------------------------------------------------
