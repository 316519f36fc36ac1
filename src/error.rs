//! Error type shared by the lattice engine.

use thiserror::Error;

//-----------------------------------------------------------------------------

/// Result type alias for lattice operations.
pub type Result<T> = std::result::Result<T, LatticeError>;

/// Errors reported by the lattice engine and its helpers.
#[derive(Error, Debug)]
pub enum LatticeError {
    /// The attribute is not declared in the attribute universe of the context.
    #[error("Attribute {0} is not in the universe")]
    AttributeNotInUniverse(String),

    /// A bit index is outside a fixed universe.
    #[error("Index {index} is outside the universe of size {universe}")]
    OutOfUniverse { index: usize, universe: usize },

    /// The attribute universe declares the same attribute more than once.
    #[error("Attribute {0} is declared more than once")]
    DuplicateAttribute(String),

    /// A label does not belong to the same universe as the lattice.
    #[error("Incompatible label: {0}")]
    Incompatible(String),

    /// An internal invariant of the graph or the lattice would be violated.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// The vertex does not exist or has been deleted.
    #[error("No such vertex: {0}")]
    NoSuchVertex(usize),

    /// There is no edge between the vertices.
    #[error("No edge from {from} to {to}")]
    NoSuchEdge { from: usize, to: usize },

    /// A frequency or a measure has a zero denominator.
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// Two tables cannot be combined.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Recursive insertion went deeper than the lattice allows.
    #[error("Recursion depth limit {0} exceeded")]
    RecursionLimit(usize),

    /// Malformed input.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LatticeError> for String {
    fn from(error: LatticeError) -> Self {
        error.to_string()
    }
}

//-----------------------------------------------------------------------------
