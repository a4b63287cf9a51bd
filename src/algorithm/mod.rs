/// Append-only node storage addressed by integer handles
pub mod arena;
/// Per-color solve and re-optimization pipeline
pub mod executor;
/// Priority queue of unexpanded node handles
pub mod frontier;
/// Best-first search for minimum-cost tilings
pub mod search;
/// Sliding-window re-optimization of complete tilings
pub mod window;
