//! Fixed 64x64 occupancy mask backed by a bit array
//!
//! A set bit marks a cell that still needs to be covered by a piece. Masks are
//! copied wholesale for every search node, so the storage is a flat inline
//! array with no heap allocation.

use bitvec::prelude::*;
use std::fmt;

/// Number of columns in every mask
pub const GRID_WIDTH: usize = 64;
/// Number of rows in every mask
pub const GRID_HEIGHT: usize = 64;
/// Total number of cells in a mask
pub const CELL_COUNT: usize = GRID_WIDTH * GRID_HEIGHT;

type MaskBits = BitArr!(for CELL_COUNT, in u64, Lsb0);

/// Grid coordinate addressed as (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Zero-based row, growing downwards
    pub row: usize,
    /// Zero-based column, growing rightwards
    pub col: usize,
}

impl Cell {
    /// Create a cell from row and column
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Convert a row-major linear index back into a cell
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: index / GRID_WIDTH,
            col: index % GRID_WIDTH,
        }
    }

    /// Row-major linear index of this cell
    pub const fn index(self) -> usize {
        self.row * GRID_WIDTH + self.col
    }

    /// Check that the cell lies on the grid
    pub const fn in_bounds(self) -> bool {
        self.row < GRID_HEIGHT && self.col < GRID_WIDTH
    }

    /// Cell displaced by a non-negative offset, if it stays on the grid
    pub const fn offset(self, rows: usize, cols: usize) -> Option<Self> {
        let moved = Self {
            row: self.row + rows,
            col: self.col + cols,
        };
        if moved.in_bounds() { Some(moved) } else { None }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}|{})", self.row, self.col)
    }
}

/// Boolean 64x64 grid where `true` means "still requires coverage"
#[derive(Clone, PartialEq, Eq)]
pub struct Mask {
    bits: MaskBits,
}

impl Default for Mask {
    fn default() -> Self {
        Self::empty()
    }
}

impl Mask {
    /// Create a mask with no open cells
    pub const fn empty() -> Self {
        Self {
            bits: MaskBits::ZERO,
        }
    }

    /// Create a mask with every cell open
    pub fn full() -> Self {
        let mut bits = MaskBits::ZERO;
        bits.fill(true);
        Self { bits }
    }

    /// Create a mask with exactly the given cells open
    ///
    /// Cells outside the grid are ignored.
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut mask = Self::empty();
        for cell in cells {
            mask.set(cell, true);
        }
        mask
    }

    /// Build a mask from text rows anchored at the top-left corner
    ///
    /// `#` marks an open cell, any other character a closed one. Characters
    /// beyond the grid edges are ignored.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut mask = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch == '#' {
                    mask.set(Cell::new(row, col), true);
                }
            }
        }
        mask
    }

    /// Test whether a cell is open; off-grid cells are never open
    pub fn is_open(&self, cell: Cell) -> bool {
        cell.in_bounds() && self.bits.get(cell.index()).as_deref() == Some(&true)
    }

    /// Set or clear a cell; off-grid cells are ignored
    pub fn set(&mut self, cell: Cell, open: bool) {
        if cell.in_bounds() {
            self.bits.set(cell.index(), open);
        }
    }

    /// Count open cells
    pub fn open_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no cells remain open
    pub fn is_clear(&self) -> bool {
        self.bits.not_any()
    }

    /// First open cell in row-major order
    pub fn first_open(&self) -> Option<Cell> {
        self.bits.first_one().map(Cell::from_index)
    }

    /// Iterate open cells in row-major order
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.bits.iter_ones().map(Cell::from_index)
    }

    /// Open every cell that is open in `other`
    pub fn union_with(&mut self, other: &Self) {
        for index in other.bits.iter_ones() {
            self.bits.set(index, true);
        }
    }

    /// Test whether any cell is open in both masks
    pub fn intersects(&self, other: &Self) -> bool {
        self.open_cells().any(|cell| other.is_open(cell))
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mask")
            .field("open", &self.open_count())
            .field("first", &self.first_open())
            .finish()
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_HEIGHT {
            for col in 0..GRID_WIDTH {
                let symbol = if self.is_open(Cell::new(row, col)) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
