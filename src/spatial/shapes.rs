//! Static brick catalog
//!
//! Every brick shape has exactly one record holding its footprint, search
//! cost and reporting metadata. Search costs are an internal unit, calibrated
//! so larger bricks cost less per covered cell; prices are euro cents.

use std::fmt;

/// (row, column) displacement of a covered cell relative to the anchor
pub type CellOffset = (usize, usize);

/// The thirteen brick shapes, in candidate enumeration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    /// Single cell
    Unit,
    /// One row, two columns
    Horizontal2,
    /// One row, three columns
    Horizontal3,
    /// One row, four columns
    Horizontal4,
    /// One row, six columns
    Horizontal6,
    /// One row, eight columns
    Horizontal8,
    /// Two rows, one column
    Vertical2,
    /// Three rows, one column
    Vertical3,
    /// Four rows, one column
    Vertical4,
    /// Six rows, one column
    Vertical6,
    /// Eight rows, one column
    Vertical8,
    /// Two by two square
    Block2,
    /// Four by four square
    Block4,
}

/// Reporting bucket a brick is counted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PriceClass {
    /// Single-cell bricks
    Unit,
    /// Straight bricks of length two
    Run2,
    /// Straight bricks of length three
    Run3,
    /// Straight bricks of length four
    Run4,
    /// Straight bricks of length six
    Run6,
    /// Straight bricks of length eight
    Run8,
    /// Square plates, counted in 2x2 units
    Block,
}

impl PriceClass {
    /// Number of price classes
    pub const COUNT: usize = 7;

    /// All classes in report order
    pub const ALL: [Self; Self::COUNT] = [
        Self::Unit,
        Self::Run2,
        Self::Run3,
        Self::Run4,
        Self::Run6,
        Self::Run8,
        Self::Block,
    ];

    /// Position of this class in `ALL`
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Label used in piece reports
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unit => "1x1",
            Self::Run2 => "1x2",
            Self::Run3 => "1x3",
            Self::Run4 => "1x4",
            Self::Run6 => "1x6",
            Self::Run8 => "1x8",
            Self::Block => "2x2",
        }
    }

    /// Price of one class unit in euro cents
    pub const fn price_cents(self) -> u64 {
        match self {
            Self::Unit | Self::Run2 | Self::Block => 7,
            Self::Run3 | Self::Run4 | Self::Run6 | Self::Run8 => 14,
        }
    }
}

impl fmt::Display for PriceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One catalog record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSpec {
    /// Shape this record describes
    pub shape: Shape,
    /// Display name, `rows x cols`
    pub name: &'static str,
    /// Footprint height in cells
    pub rows: usize,
    /// Footprint width in cells
    pub cols: usize,
    /// Number of covered cells
    pub cells: u32,
    /// Search cost of placing this brick
    pub search_cost: u32,
    /// Bucket for price reporting
    pub price_class: PriceClass,
    /// How many class units one brick counts as
    pub price_units: u32,
    /// Covered cells relative to the anchor, anchor first
    pub offsets: &'static [CellOffset],
}

const UNIT: &[CellOffset] = &[(0, 0)];
const H2: &[CellOffset] = &[(0, 0), (0, 1)];
const H3: &[CellOffset] = &[(0, 0), (0, 1), (0, 2)];
const H4: &[CellOffset] = &[(0, 0), (0, 1), (0, 2), (0, 3)];
const H6: &[CellOffset] = &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5)];
const H8: &[CellOffset] = &[
    (0, 0),
    (0, 1),
    (0, 2),
    (0, 3),
    (0, 4),
    (0, 5),
    (0, 6),
    (0, 7),
];
const V2: &[CellOffset] = &[(0, 0), (1, 0)];
const V3: &[CellOffset] = &[(0, 0), (1, 0), (2, 0)];
const V4: &[CellOffset] = &[(0, 0), (1, 0), (2, 0), (3, 0)];
const V6: &[CellOffset] = &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)];
const V8: &[CellOffset] = &[
    (0, 0),
    (1, 0),
    (2, 0),
    (3, 0),
    (4, 0),
    (5, 0),
    (6, 0),
    (7, 0),
];
const B2: &[CellOffset] = &[(0, 0), (0, 1), (1, 0), (1, 1)];
const B4: &[CellOffset] = &[
    (0, 0),
    (0, 1),
    (0, 2),
    (0, 3),
    (1, 0),
    (1, 1),
    (1, 2),
    (1, 3),
    (2, 0),
    (2, 1),
    (2, 2),
    (2, 3),
    (3, 0),
    (3, 1),
    (3, 2),
    (3, 3),
];

const fn record(
    shape: Shape,
    name: &'static str,
    rows: usize,
    cols: usize,
    search_cost: u32,
    price_class: PriceClass,
    price_units: u32,
    offsets: &'static [CellOffset],
) -> ShapeSpec {
    ShapeSpec {
        shape,
        name,
        rows,
        cols,
        cells: (rows * cols) as u32,
        search_cost,
        price_class,
        price_units,
        offsets,
    }
}

/// The catalog, indexed by `Shape` discriminant
pub static SHAPES: [ShapeSpec; 13] = [
    record(Shape::Unit, "1x1", 1, 1, 54, PriceClass::Unit, 1, UNIT),
    record(Shape::Horizontal2, "1x2", 1, 2, 43, PriceClass::Run2, 1, H2),
    record(Shape::Horizontal3, "1x3", 1, 3, 84, PriceClass::Run3, 1, H3),
    record(Shape::Horizontal4, "1x4", 1, 4, 83, PriceClass::Run4, 1, H4),
    record(Shape::Horizontal6, "1x6", 1, 6, 84, PriceClass::Run6, 1, H6),
    record(Shape::Horizontal8, "1x8", 1, 8, 83, PriceClass::Run8, 1, H8),
    record(Shape::Vertical2, "2x1", 2, 1, 43, PriceClass::Run2, 1, V2),
    record(Shape::Vertical3, "3x1", 3, 1, 84, PriceClass::Run3, 1, V3),
    record(Shape::Vertical4, "4x1", 4, 1, 83, PriceClass::Run4, 1, V4),
    record(Shape::Vertical6, "6x1", 6, 1, 84, PriceClass::Run6, 1, V6),
    record(Shape::Vertical8, "8x1", 8, 1, 83, PriceClass::Run8, 1, V8),
    record(Shape::Block2, "2x2", 2, 2, 41, PriceClass::Block, 1, B2),
    record(Shape::Block4, "4x4", 4, 4, 160, PriceClass::Block, 4, B4),
];

/// Horizontal runs in increasing length
pub const HORIZONTAL_RUNS: [Shape; 5] = [
    Shape::Horizontal2,
    Shape::Horizontal3,
    Shape::Horizontal4,
    Shape::Horizontal6,
    Shape::Horizontal8,
];

/// Vertical runs in increasing length
pub const VERTICAL_RUNS: [Shape; 5] = [
    Shape::Vertical2,
    Shape::Vertical3,
    Shape::Vertical4,
    Shape::Vertical6,
    Shape::Vertical8,
];

impl Shape {
    /// Catalog record for this shape
    // Discriminants are declared in the same order as `SHAPES`
    #[allow(clippy::indexing_slicing)]
    pub fn spec(self) -> &'static ShapeSpec {
        &SHAPES[self as usize]
    }

    /// Display name, `rows x cols`
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Number of covered cells
    pub fn cells(self) -> u32 {
        self.spec().cells
    }

    /// Search cost of placing this brick
    pub fn search_cost(self) -> u32 {
        self.spec().search_cost
    }

    /// Covered cells relative to the anchor
    pub fn offsets(self) -> &'static [CellOffset] {
        self.spec().offsets
    }

    /// Footprint as (rows, cols)
    pub fn dimensions(self) -> (usize, usize) {
        (self.spec().rows, self.spec().cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Smallest search cost per covered cell over the whole catalog, rounded down
pub fn min_cost_per_cell() -> u32 {
    SHAPES
        .iter()
        .map(|spec| spec.search_cost / spec.cells)
        .min()
        .unwrap_or(0)
}

/// Check that a per-cell bound never overestimates the remaining cost
///
/// A bound is admissible when no brick covers its cells more cheaply than
/// `bound` per cell, which keeps the best-first search optimal.
pub fn is_admissible(per_cell_bound: u32) -> bool {
    per_cell_bound <= min_cost_per_cell()
}
