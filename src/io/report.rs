//! Plain-text piece report

use crate::algorithm::executor::ColorTiling;
use crate::analysis::tally::{PieceTally, format_euros};
use crate::io::error::{AlgorithmError, Result};
use std::fmt::Write as _;
use std::path::Path;

/// Report listing each color's piece counts followed by a grand total
pub fn format_report(tilings: &[ColorTiling]) -> String {
    let mut report = String::new();
    let mut grand = PieceTally::default();

    // Writing to a String cannot fail
    for tiling in tilings {
        let tally = PieceTally::from_placements(&tiling.placements);
        let [r, g, b] = tiling.color;
        let _ = writeln!(report, "Color = [{r}, {g}, {b}]");
        let _ = write!(report, "{tally}");
        let _ = writeln!(report, "Subtotal -> {}", format_euros(tally.total_cents()));
        let _ = writeln!(report);
        grand.merge(&tally);
    }

    let _ = writeln!(report, "Total");
    let _ = write!(report, "{grand}");
    let _ = writeln!(report, "Total -> {}", format_euros(grand.total_cents()));
    report
}

/// Write the report to `output_path`
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn write_report(tilings: &[ColorTiling], output_path: &Path) -> Result<()> {
    std::fs::write(output_path, format_report(tilings)).map_err(|e| AlgorithmError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write report",
        source: e,
    })
}
