//! Partial-order value types.
//!
//! Every label stored in a [`crate::Lattice`] implements [`PartialOrder`].
//! The trait compares two values with a four-way [`Relation`] and provides the greatest lower bound and the least upper bound in that order.
//!
//! Three value types are provided:
//!
//! * [`Concept`]: an (extent, intent) pair ordered by intent inclusion.
//! * [`Poset`]: a plain set ordered by inclusion.
//! * [`Interval`]: a half-open interval on a numbered dimension ordered by containment.
//!
//! ### Ordering convention
//!
//! Smaller values rank [`Relation::Less`].
//! For concepts, a smaller intent is a more general concept, so the most general concept of a lattice is the least element in this order.
//! Lattices do not redefine the comparison.
//! They take a [`Direction`] that states which way dominance points instead.

pub mod concept;
pub mod interval;
pub mod poset;

pub use concept::Concept;
pub use interval::Interval;
pub use poset::Poset;

use std::fmt::{Debug, Display};


//-----------------------------------------------------------------------------

/// Result of comparing two values of a partial order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Relation {
    /// The first value is strictly below the second.
    Less,
    /// The first value is strictly above the second.
    Greater,
    /// The values are equal in the order.
    Equal,
    /// Neither value is below the other.
    NonComparable,
}

impl Relation {
    /// Returns the relation with the arguments swapped.
    pub fn flip(self) -> Self {
        match self {
            Relation::Less => Relation::Greater,
            Relation::Greater => Relation::Less,
            other => other,
        }
    }

    /// Returns `true` if the values are comparable.
    #[inline]
    pub fn is_comparable(self) -> bool {
        self != Relation::NonComparable
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Relation::Less => write!(f, "less"),
            Relation::Greater => write!(f, "greater"),
            Relation::Equal => write!(f, "equal"),
            Relation::NonComparable => write!(f, "non-comparable"),
        }
    }
}

/// Which way a lattice or a traversal follows the order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards greater values.
    #[default]
    Forward,
    /// Towards smaller values.
    Reverse,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// Returns the relation that a value strictly ahead in this direction has to the current one.
    #[inline]
    pub fn ahead(self) -> Relation {
        match self {
            Direction::Forward => Relation::Greater,
            Direction::Reverse => Relation::Less,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Reverse => write!(f, "reverse"),
        }
    }
}

//-----------------------------------------------------------------------------

/// A value type with a partial order and bounds.
///
/// Implementations must be total: comparing or combining two values never panics.
/// Values that cannot be combined report [`None`] from the bound operations.
pub trait PartialOrder: Clone + Debug {
    /// Compares this value to another.
    ///
    /// Must be antisymmetric: `a.relation(b)` is the flip of `b.relation(a)`.
    fn relation(&self, other: &Self) -> Relation;

    /// Returns the greatest lower bound of the values.
    fn lower_bound(&self, other: &Self) -> Option<Self>;

    /// Returns the least upper bound of the values.
    fn upper_bound(&self, other: &Self) -> Option<Self>;

    /// Returns a scalar size of the value.
    fn measure(&self) -> usize;

    /// Returns `true` if the values belong to the same universe and can be stored in the same lattice.
    fn is_compatible(&self, _other: &Self) -> bool {
        true
    }
}

//-----------------------------------------------------------------------------
