//! Algorithm constants and runtime configuration defaults

// Search bounds, in search-cost units per open cell
/// Greedy bound for the initial full-grid solve
pub const COARSE_BOUND: u32 = 35;
/// Admissible bound for window re-optimization
pub const FINE_BOUND: u32 = 10;

// Window re-optimization layout
/// Edge length of a re-optimization window in cells
pub const WINDOW_SIZE: usize = 8;
/// Distance between neighbouring window origins
pub const WINDOW_STRIDE: usize = 4;
/// Node expansions one window search may spend before keeping its bricks
pub const WINDOW_MAX_EXPANSIONS: usize = 2_000;
/// Frontier width kept by window searches
pub const WINDOW_MAX_FRONTIER: usize = 1_024;

// Rendering
/// Vector-graphics units per grid cell
pub const CELL_SCALE: usize = 10;
/// Inset of each brick outline from its cell boundary
pub const BRICK_INSET: usize = 2;
/// Preview image pixels per grid cell
pub const PREVIEW_CELL_PIXELS: u32 = 10;
/// Outline color of bricks in the preview image
pub const PREVIEW_OUTLINE: [u8; 3] = [32, 32, 32];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix of the vector-graphics tiling file
pub const TILING_SUFFIX: &str = "_tiling";
/// Suffix of the piece report file
pub const REPORT_SUFFIX: &str = "_pieces";
/// Suffix of the preview image
pub const PREVIEW_SUFFIX: &str = "_preview";
