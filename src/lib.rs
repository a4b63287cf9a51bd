//! Minimum-cost brick tiling of 64x64 pixel art
//!
//! Each color of a source image becomes a boolean mask. A best-first search
//! covers the mask with bricks from a fixed catalog at minimum total cost,
//! and a sliding-window pass re-solves small regions with an exact bound to
//! clean up what the greedier initial search left behind.

#![forbid(unsafe_code)]

/// Best-first search, window re-optimization and the per-color pipeline
pub mod algorithm;
/// Palette extraction and piece statistics
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Grid masks, brick catalog and placement geometry
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
