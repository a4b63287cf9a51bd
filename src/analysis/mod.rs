//! Source image reduction and tiling statistics

/// Palette extraction and per-color masks
pub mod palette;
/// Piece counts and prices per price class
pub mod tally;
