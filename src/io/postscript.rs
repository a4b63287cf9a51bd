//! Encapsulated PostScript rendering of tilings
//!
//! Every brick becomes one call of a shared `B` procedure taking the anchor
//! column and row, the footprint rows and columns, and the color as three
//! channels in `[0, 1]`. The page is flipped so grid rows grow downwards.

use crate::algorithm::executor::ColorTiling;
use crate::io::configuration::{BRICK_INSET, CELL_SCALE};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::Placement;
use crate::spatial::mask::{GRID_HEIGHT, GRID_WIDTH};
use std::fmt::Write as _;
use std::path::Path;

/// Document header including the bounding box and the `B` procedure
pub fn header() -> String {
    let width = GRID_WIDTH * CELL_SCALE;
    let height = GRID_HEIGHT * CELL_SCALE;
    let inset = BRICK_INSET;
    let scale = CELL_SCALE;
    format!(
        "%!PS-Adobe-3.0 EPSF-3.0
%%BoundingBox: 0 -{height} {width} 0
1 -1 scale
/B {{
7 dict begin
/b exch def
/g exch def
/r exch def
/w exch def
/h exch def
/y exch def
/x exch def
gsave
x {scale} mul y {scale} mul translate
newpath
{inset} {inset} moveto
{scale} w mul {inset} lineto
{scale} w mul {scale} h mul lineto
{inset} {scale} h mul lineto
closepath
gsave
r g b setrgbcolor
fill
grestore
stroke
grestore
end
}} def
"
    )
}

/// Format a color channel scaled to `[0, 1]` with trailing zeros removed
pub fn channel(value: u8) -> String {
    let scaled = format!("{:.6}", f64::from(value) / 255.0);
    let trimmed = scaled.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// One `B` call drawing `placement` in `color`
pub fn placement_line(placement: Placement, color: [u8; 3]) -> String {
    let (rows, cols) = placement.shape.dimensions();
    let [r, g, b] = color;
    format!(
        "{} {} {rows} {cols} {} {} {} B",
        placement.anchor.col,
        placement.anchor.row,
        channel(r),
        channel(g),
        channel(b)
    )
}

/// Complete document for all colors, in the given order
pub fn render(tilings: &[ColorTiling]) -> String {
    let mut document = header();
    for tiling in tilings {
        for &placement in &tiling.placements {
            // Writing to a String cannot fail
            let _ = writeln!(document, "{}", placement_line(placement, tiling.color));
        }
    }
    document
}

/// Render and write the document to `output_path`
///
/// # Errors
///
/// Returns an error if the file cannot be written
pub fn write_eps(tilings: &[ColorTiling], output_path: &Path) -> Result<()> {
    std::fs::write(output_path, render(tilings)).map_err(|e| AlgorithmError::FileSystem {
        path: output_path.to_path_buf(),
        operation: "write tiling",
        source: e,
    })
}
