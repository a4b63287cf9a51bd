//! Spatial data structures and brick geometry
//!
//! This module contains spatial-related functionality including:
//! - The fixed-size occupancy mask
//! - The static brick catalog
//! - Placement enumeration and application

/// Fixed 64x64 occupancy mask
pub mod mask;
/// Brick placement enumeration and application
pub mod placement;
/// Brick shape catalog with costs and prices
pub mod shapes;

pub use mask::{Cell, Mask};
pub use placement::Placement;
pub use shapes::Shape;
