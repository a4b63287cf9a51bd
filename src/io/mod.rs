//! Input/output: errors, constants, image and document formats, CLI

/// Command-line parsing and batch file processing
pub mod cli;
/// Algorithm constants and output naming
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// PNG loading and preview export
pub mod image;
/// Encapsulated PostScript rendering
pub mod postscript;
/// Terminal progress bars
pub mod progress;
/// Piece report formatting
pub mod report;
