//! Brick placement geometry
//!
//! Enumerates the bricks that fit at an anchor cell and clears a placed
//! brick's footprint from a mask. Both operations are pure: masks are never
//! modified in place.

use crate::spatial::mask::{Cell, Mask};
use crate::spatial::shapes::{HORIZONTAL_RUNS, Shape, VERTICAL_RUNS};
use std::fmt;

/// A brick shape anchored at its top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Brick shape
    pub shape: Shape,
    /// Top-left covered cell
    pub anchor: Cell,
}

impl Placement {
    /// Create a placement
    pub const fn new(shape: Shape, anchor: Cell) -> Self {
        Self { shape, anchor }
    }

    /// Covered cells, skipping any that would fall off the grid
    pub fn footprint(self) -> impl Iterator<Item = Cell> {
        self.shape
            .offsets()
            .iter()
            .filter_map(move |&(rows, cols)| self.anchor.offset(rows, cols))
    }

    /// Test that the whole footprint is on the grid and open in `mask`
    pub fn fits(self, mask: &Mask) -> bool {
        self.shape
            .offsets()
            .iter()
            .all(|&(rows, cols)| self.anchor.offset(rows, cols).is_some_and(|c| mask.is_open(c)))
    }

    /// Search cost of this placement
    pub fn search_cost(self) -> u32 {
        self.shape.search_cost()
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.shape, self.anchor)
    }
}

/// Enumerate every brick that fits at `anchor`
///
/// Candidates are produced in a fixed order: the unit cell, horizontal runs
/// by increasing length, vertical runs by increasing length, the 2x2 block,
/// then the 4x4 block. A run is only offered while every shorter run was, and
/// the 4x4 block only when the 2x2 block fits. A closed or off-grid anchor
/// yields nothing.
pub fn fitting_placements(mask: &Mask, anchor: Cell) -> Vec<Placement> {
    let mut candidates = Vec::with_capacity(13);
    if !mask.is_open(anchor) {
        return candidates;
    }

    let open = |rows: usize, cols: usize| anchor.offset(rows, cols).is_some_and(|c| mask.is_open(c));

    candidates.push(Placement::new(Shape::Unit, anchor));

    let mut checked = 1;
    for shape in HORIZONTAL_RUNS {
        let (_, length) = shape.dimensions();
        if !(checked..length).all(|col| open(0, col)) {
            break;
        }
        candidates.push(Placement::new(shape, anchor));
        checked = length;
    }

    checked = 1;
    for shape in VERTICAL_RUNS {
        let (length, _) = shape.dimensions();
        if !(checked..length).all(|row| open(row, 0)) {
            break;
        }
        candidates.push(Placement::new(shape, anchor));
        checked = length;
    }

    let block = Placement::new(Shape::Block2, anchor);
    if block.fits(mask) {
        candidates.push(block);
        let large = Placement::new(Shape::Block4, anchor);
        if large.fits(mask) {
            candidates.push(large);
        }
    }

    candidates
}

/// Return a copy of `mask` with the placement's footprint cleared
pub fn apply_placement(mask: &Mask, placement: Placement) -> Mask {
    let mut result = mask.clone();
    for cell in placement.footprint() {
        result.set(cell, false);
    }
    result
}

/// Union of the footprints of all placements
pub fn coverage(placements: &[Placement]) -> Mask {
    Mask::from_cells(placements.iter().flat_map(|placement| placement.footprint()))
}

/// Check that no two placements share a cell
pub fn is_disjoint(placements: &[Placement]) -> bool {
    let mut covered = Mask::empty();
    for placement in placements {
        let piece = Mask::from_cells(placement.footprint());
        if covered.intersects(&piece) {
            return false;
        }
        covered.union_with(&piece);
    }
    true
}

/// Sum of search costs
pub fn total_cost(placements: &[Placement]) -> u32 {
    placements.iter().map(|placement| placement.search_cost()).sum()
}
