//! # Concept lattices: incremental construction of Galois lattices.
//!
//! This crate maintains the concept lattice of a formal context under repeated insertion.
//! A formal context is a binary relation between objects and attributes.
//! A concept is a pair (extent, intent) where the extent is the set of objects that have every attribute in the intent, and the intent is the set of attributes shared by every object in the extent.
//! The concepts form a lattice, which is stored as its Hasse diagram.
//!
//! Each insertion finds the most specific existing concept that generalizes the new intent, creates the new concept and every missing generalization, and rewires the covering edges.
//! The lattice is valid after every insertion, so queries can be interleaved with updates.
//!
//! See [`Context`] for the high-level interface with named objects and attributes.
//! See [`ConceptLattice`], [`IntervalLattice`], and [`SetLattice`] for lattices over specific value types, and [`Lattice`] for the generic engine.
//!
//! ### Basic concepts
//!
//! Lattice labels implement the [`PartialOrder`] trait.
//! Two labels are compared with a four-way [`Relation`].
//! Smaller labels rank [`Relation::Less`]; for concepts, a smaller intent is a more general concept.
//! A lattice is parameterized by a [`Direction`] that states which labels are more specific.
//!
//! The Hasse diagram is stored in a [`Graph`], which is an arena of vertices identified by their offsets.
//! Graph traversals in [`traversal`] use per-traversal colors to avoid revisiting vertices.
//!
//! Sets of objects and attributes are stored as [`BitSet`] values over index spaces.
//! A [`CrossTable`] is a dense representation of the incidence relation that supports the usual algebraic operations on contexts.
//!
//! ### Logging
//!
//! The library reports lattice growth through the [`log`] facade.
//! No logger is installed by the library.

pub mod bitset;
pub mod context;
pub mod cross_table;
pub mod error;
pub mod formats;
pub mod graph;
pub mod lattice;
pub mod lattices;
pub mod order;
pub mod traversal;
pub mod utils;

#[cfg(test)]
pub(crate) mod internal;

pub use bitset::BitSet;
pub use context::Context;
pub use cross_table::CrossTable;
pub use error::{LatticeError, Result};
pub use graph::{Color, Edge, Graph, Vertex, VertexId};
pub use lattice::Lattice;
pub use lattices::{ConceptLattice, IntervalLattice, SetLattice};
pub use order::{Concept, Direction, Interval, PartialOrder, Poset, Relation};
