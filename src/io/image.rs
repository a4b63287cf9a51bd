//! PNG decoding with pixel-format checks and tiling preview export

use crate::algorithm::executor::ColorTiling;
use crate::io::configuration::{PREVIEW_CELL_PIXELS, PREVIEW_OUTLINE};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::mask::{GRID_HEIGHT, GRID_WIDTH};
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;

const BACKGROUND: [u8; 3] = [255, 255, 255];

/// Decode a PNG that stores exactly three bytes per pixel
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The decoded pixels are anything other than 8-bit RGB
pub fn load_rgb_png(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).map_err(|source| AlgorithmError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    match image {
        DynamicImage::ImageRgb8(rgb) => Ok(rgb),
        other => Err(AlgorithmError::UnsupportedPixelFormat {
            path: path.to_path_buf(),
            color_type: format!("{:?}", other.color()),
        }),
    }
}

/// Draw every brick of every color as a filled, outlined rectangle
pub fn render_preview(tilings: &[ColorTiling]) -> RgbImage {
    let width = GRID_WIDTH as u32 * PREVIEW_CELL_PIXELS;
    let height = GRID_HEIGHT as u32 * PREVIEW_CELL_PIXELS;
    let mut image = RgbImage::from_pixel(width, height, Rgb(BACKGROUND));

    for tiling in tilings {
        for placement in &tiling.placements {
            let (rows, cols) = placement.shape.dimensions();
            let left = placement.anchor.col as u32 * PREVIEW_CELL_PIXELS;
            let top = placement.anchor.row as u32 * PREVIEW_CELL_PIXELS;
            let right = left + cols as u32 * PREVIEW_CELL_PIXELS - 1;
            let bottom = top + rows as u32 * PREVIEW_CELL_PIXELS - 1;

            for y in top..=bottom {
                for x in left..=right {
                    let edge = x == left || x == right || y == top || y == bottom;
                    let color = if edge { PREVIEW_OUTLINE } else { tiling.color };
                    if let Some(pixel) = image.get_pixel_mut_checked(x, y) {
                        *pixel = Rgb(color);
                    }
                }
            }
        }
    }

    image
}

/// Render the preview and save it as a PNG
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_preview_png(tilings: &[ColorTiling], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    render_preview(tilings)
        .save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
