//! Dense object-by-attribute tables and their algebra.
//!
//! A [`CrossTable`] stores the incidence relation of a formal context as one [`BitSet`] per row.
//! Tables can be combined into product contexts:
//!
//! * [`CrossTable::complement`]: flip every cell.
//! * [`CrossTable::horizontal_sum`]: place the columns of two tables with the same rows side by side.
//! * [`CrossTable::vertical_sum`]: stack the rows of two tables.
//! * [`CrossTable::direct_product`]: stack the rows of two tables in disjoint column blocks, filling the off-diagonal blocks.

use crate::{BitSet, LatticeError, Result};

use std::fmt::Display;

//-----------------------------------------------------------------------------

/// A boolean table of objects (rows) and attributes (columns).
///
/// The number of columns is the largest column seen in any row plus one, or more if set explicitly.
///
/// # Examples
///
/// ```
/// use concept_lattice::{BitSet, CrossTable};
///
/// let mut table = CrossTable::new();
/// table.add_row(BitSet::from_indices(2, [0]).unwrap());
/// table.add_row(BitSet::from_indices(3, [1, 2]).unwrap());
/// assert_eq!((table.rows(), table.columns()), (2, 3));
/// assert_eq!(table.to_string(), "X..\n.XX\n");
/// assert_eq!(table.complement().to_string(), ".XX\nX..\n");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CrossTable {
    rows: Vec<BitSet>,
    columns: usize,
}

impl CrossTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with at least the given number of columns.
    pub fn with_columns(columns: usize) -> Self {
        CrossTable { rows: Vec::new(), columns }
    }

    /// Appends a row and grows the number of columns if necessary.
    pub fn add_row(&mut self, row: BitSet) {
        if let Some(max) = row.max() {
            self.columns = self.columns.max(max + 1);
        }
        self.rows.push(row);
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Returns `true` if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the row, or [`None`] if there is no such row.
    #[inline]
    pub fn row(&self, index: usize) -> Option<&BitSet> {
        self.rows.get(index)
    }

    /// Returns `true` if the cell is set.
    pub fn get(&self, row: usize, column: usize) -> bool {
        self.rows.get(row).map(|bits| bits.contains(column)).unwrap_or(false)
    }

    /// Returns an iterator over `(row index, row)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BitSet)> + '_ {
        self.rows.iter().enumerate()
    }

    /// Returns the table with every cell below the number of columns flipped.
    pub fn complement(&self) -> CrossTable {
        let mut result = CrossTable::with_columns(self.columns);
        for row in self.rows.iter() {
            let mut flipped = BitSet::with_len(self.columns);
            for column in (0..self.columns).filter(|&column| !row.contains(column)) {
                flipped.insert(column);
            }
            result.add_row(flipped);
        }
        result
    }

    /// Returns the apposition of the tables: row `i` is row `i` of this table followed by row `i` of the other table.
    ///
    /// Returns an error if the tables have different numbers of rows.
    pub fn horizontal_sum(&self, other: &CrossTable) -> Result<CrossTable> {
        if self.rows() != other.rows() {
            return Err(LatticeError::DimensionMismatch { expected: self.rows(), found: other.rows() });
        }
        let mut result = CrossTable::with_columns(self.columns + other.columns);
        for (ours, theirs) in self.rows.iter().zip(other.rows.iter()) {
            result.add_row(ours.union(&theirs.shifted(self.columns, other.columns)));
        }
        Ok(result)
    }

    /// Returns the subposition of the tables: the rows of this table followed by the rows of the other table.
    ///
    /// Both parts share the column range.
    pub fn vertical_sum(&self, other: &CrossTable) -> CrossTable {
        let columns = self.columns.max(other.columns);
        let mut result = CrossTable::with_columns(columns);
        for row in self.rows.iter().chain(other.rows.iter()) {
            let mut padded = row.clone();
            padded.grow(columns);
            result.add_row(padded);
        }
        result
    }

    /// Returns the direct sum of the contexts, whose concept lattice is the direct product of the two lattices.
    ///
    /// The rows of this table use the first block of columns and the rows of the other table use the second block.
    /// Every row also has all columns of the other block set.
    pub fn direct_product(&self, other: &CrossTable) -> CrossTable {
        let columns = self.columns + other.columns;
        let mut result = CrossTable::with_columns(columns);
        for row in self.rows.iter() {
            let mut combined = row.clone();
            combined.fill(self.columns..columns);
            result.add_row(combined);
        }
        for row in other.rows.iter() {
            let mut combined = row.shifted(self.columns, other.columns);
            combined.fill(0..self.columns);
            result.add_row(combined);
        }
        result
    }
}

impl Display for CrossTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for row in self.rows.iter() {
            for column in 0..self.columns {
                write!(f, "{}", if row.contains(column) { 'X' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//-----------------------------------------------------------------------------


//-----------------------------------------------------------------------------
