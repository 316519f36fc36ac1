//! Formal contexts.
//!
//! A [`Context`] owns a growable list of objects and a fixed attribute universe.
//! Each inserted object is encoded as an intent over the universe and added to a [`ConceptLattice`].
//! Frequency queries are answered from the extents of the lattice:
//!
//! * [`Context::support`]: number of objects that have all the attributes.
//! * [`Context::marginal`]: support divided by the number of objects.
//! * [`Context::joint`]: marginal of the union of two attribute lists.
//! * [`Context::conditional`]: joint frequency divided by the marginal of the condition.

use crate::cross_table::CrossTable;
use crate::graph::VertexId;
use crate::lattices::ConceptLattice;
use crate::order::Concept;
use crate::{BitSet, LatticeError, Result};

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::io::Write;

use log::debug;


//-----------------------------------------------------------------------------

/// A formal context with its concept lattice.
///
/// # Examples
///
/// ```
/// use concept_lattice::Context;
///
/// let mut context = Context::new(vec!["a", "b", "c"]).unwrap();
/// context.insert("o1", &["a", "b"]).unwrap();
/// context.insert("o2", &["a"]).unwrap();
///
/// assert_eq!(context.support(&["a"]).unwrap(), 2);
/// assert_eq!(context.support(&["a", "b"]).unwrap(), 1);
/// assert_eq!(context.conditional(&["b"], &["a"]).unwrap(), 0.5);
/// assert!(context.insert("o3", &["d"]).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct Context<O, A> {
    objects: Vec<O>,
    attributes: Vec<A>,
    index: HashMap<A, usize>,
    intents: Vec<BitSet>,
    lattice: ConceptLattice,
}

/// Construction and bookkeeping.
impl<O, A: Clone + Eq + Hash + Debug> Context<O, A> {
    /// Creates an empty context over the given attribute universe.
    ///
    /// Returns an error if an attribute is declared more than once.
    pub fn new(attributes: Vec<A>) -> Result<Self> {
        let mut index: HashMap<A, usize> = HashMap::with_capacity(attributes.len());
        for (i, attribute) in attributes.iter().enumerate() {
            if index.insert(attribute.clone(), i).is_some() {
                return Err(LatticeError::DuplicateAttribute(format!("{:?}", attribute)));
            }
        }
        let lattice = ConceptLattice::new(attributes.len());
        Ok(Context { objects: Vec::new(), attributes, index, intents: Vec::new(), lattice })
    }

    /// Creates a context from a cross table with the given object and attribute names.
    ///
    /// Returns an error if the numbers of objects or attributes do not match the table.
    pub fn from_cross_table(table: &CrossTable, objects: Vec<O>, attributes: Vec<A>) -> Result<Self> {
        if objects.len() != table.rows() {
            return Err(LatticeError::DimensionMismatch { expected: table.rows(), found: objects.len() });
        }
        if attributes.len() < table.columns() {
            return Err(LatticeError::DimensionMismatch { expected: table.columns(), found: attributes.len() });
        }
        let mut result = Self::new(attributes)?;
        let universe = result.attributes.len();
        for (object, (_, row)) in objects.into_iter().zip(table.iter()) {
            let intent = BitSet::from_indices(universe, row.iter())?;
            result.insert_intent(object, intent)?;
        }
        Ok(result)
    }

    /// Returns the context with the given maximum recursion depth for lattice insertions.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.lattice = self.lattice.with_max_depth(max_depth);
        self
    }

    /// Returns the number of objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if there are no objects.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns the objects in insertion order.
    #[inline]
    pub fn objects(&self) -> &[O] {
        &self.objects
    }

    /// Returns the attribute universe.
    #[inline]
    pub fn attributes(&self) -> &[A] {
        &self.attributes
    }

    /// Returns the intent of the object with the given index.
    #[inline]
    pub fn intent_of(&self, object: usize) -> Option<&BitSet> {
        self.intents.get(object)
    }

    /// Returns the concept lattice.
    #[inline]
    pub fn lattice(&self) -> &ConceptLattice {
        &self.lattice
    }

    /// Encodes the attributes as an intent.
    ///
    /// Returns an error if an attribute is not in the universe.
    pub fn encode(&self, attributes: &[A]) -> Result<BitSet> {
        let mut result = BitSet::with_len(self.attributes.len());
        for attribute in attributes {
            let index = self.index.get(attribute).ok_or_else(|| {
                LatticeError::AttributeNotInUniverse(format!("{:?}", attribute))
            })?;
            result.insert(*index);
        }
        Ok(result)
    }

    /// Decodes an intent into attributes in universe order.
    ///
    /// Indices outside the universe are ignored.
    pub fn decode(&self, intent: &BitSet) -> Vec<&A> {
        intent.iter().filter_map(|index| self.attributes.get(index)).collect()
    }

    /// Decodes an extent into objects in insertion order.
    ///
    /// Indices of unknown objects are ignored.
    pub fn objects_of(&self, extent: &BitSet) -> Vec<&O> {
        extent.iter().filter_map(|index| self.objects.get(index)).collect()
    }

    /// Inserts an object with the given attributes and returns the vertex of its concept.
    ///
    /// Returns an error if an attribute is not in the universe or if the lattice cannot be updated.
    /// The context and its lattice are not modified in that case.
    pub fn insert(&mut self, object: O, attributes: &[A]) -> Result<VertexId> {
        let intent = self.encode(attributes)?;
        self.insert_intent(object, intent)
    }

    fn insert_intent(&mut self, object: O, intent: BitSet) -> Result<VertexId> {
        let index = self.objects.len();
        let id = self.lattice.insert_object(index, intent.clone())?;
        debug!("Inserted object {} with {} attributes as vertex {}", index, intent.count(), id);
        self.objects.push(object);
        self.intents.push(intent);
        Ok(id)
    }

    /// Returns a cross table of the incidence relation with one row per object.
    pub fn cross_table(&self) -> CrossTable {
        let mut result = CrossTable::with_columns(self.attributes.len());
        for intent in self.intents.iter() {
            result.add_row(intent.clone());
        }
        result
    }
}

//-----------------------------------------------------------------------------

/// Statistics.
impl<O, A: Clone + Eq + Hash + Debug> Context<O, A> {
    /// Returns the most general concept whose intent contains all the attributes.
    ///
    /// The extent of the concept consists of the objects that have all the attributes.
    /// Returns [`None`] if no object has all the attributes.
    pub fn concept_of(&self, attributes: &[A]) -> Result<Option<&Concept>> {
        let intent = self.encode(attributes)?;
        Ok(self.lattice.concept_of(&intent))
    }

    /// Returns the number of objects that have all the attributes.
    pub fn support(&self, attributes: &[A]) -> Result<usize> {
        let intent = self.encode(attributes)?;
        Ok(self.lattice.support(&intent))
    }

    /// Returns the fraction of objects that have all the attributes.
    ///
    /// Returns an error if there are no objects.
    pub fn marginal(&self, attributes: &[A]) -> Result<f64> {
        let support = self.support(attributes)?;
        self.frequency(support)
    }

    /// Returns the fraction of objects that have all attributes in both lists.
    ///
    /// Returns an error if there are no objects.
    pub fn joint(&self, a: &[A], b: &[A]) -> Result<f64> {
        let intent = self.encode(a)?.union(&self.encode(b)?);
        self.frequency(self.lattice.support(&intent))
    }

    /// Returns the fraction of the objects with attributes `b` that also have attributes `a`.
    ///
    /// Returns an error if no object has attributes `b`.
    pub fn conditional(&self, a: &[A], b: &[A]) -> Result<f64> {
        let joint = self.joint(a, b)?;
        let marginal = self.marginal(b)?;
        if marginal == 0.0 {
            return Err(LatticeError::DivisionByZero(format!("No objects with attributes {:?}", b)));
        }
        Ok(joint / marginal)
    }

    /// Returns the lattice measure of the attribute lists: the support of their join divided by the support of the meet of `b` with the top.
    pub fn measure(&self, a: &[A], b: &[A]) -> Result<f64> {
        let a = Concept::new(BitSet::new(), self.encode(a)?);
        let b = Concept::new(BitSet::new(), self.encode(b)?);
        self.lattice.lattice().measure(&a, &b)
    }

    fn frequency(&self, support: usize) -> Result<f64> {
        if self.objects.is_empty() {
            return Err(LatticeError::DivisionByZero(String::from("The context has no objects")));
        }
        Ok(support as f64 / self.objects.len() as f64)
    }
}

//-----------------------------------------------------------------------------

/// Output.
impl<O: Display, A: Clone + Eq + Hash + Debug + Display> Context<O, A> {
    /// Returns a label for the concept: the objects, a separator, and the attributes.
    pub fn describe(&self, concept: &Concept) -> String {
        let objects: Vec<String> = self.objects_of(concept.extent()).iter().map(|object| object.to_string()).collect();
        let attributes: Vec<String> = self.decode(concept.intent()).iter().map(|attribute| attribute.to_string()).collect();
        format!("{} | {}", objects.join(", "), attributes.join(", "))
    }

    /// Writes the Hasse diagram of the concept lattice in the DOT format.
    ///
    /// Edges point from general concepts to specific ones, or the other way if `reverse` is set.
    /// Returns the number of edges written.
    pub fn write_hasse_diagram<W: Write>(&self, output: &mut W, reverse: bool) -> Result<usize> {
        self.lattice.lattice().write_dot(output, reverse, |concept| self.describe(concept))
    }
}

//-----------------------------------------------------------------------------
