//! Color palette extraction and per-color mask construction

use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::image::load_rgb_png;
use crate::spatial::Mask;
use crate::spatial::mask::{Cell, GRID_HEIGHT, GRID_WIDTH};
use ndarray::Array2;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

const CHANNELS: usize = 3;

/// Source image reduced to integer labels over a sorted RGB palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteImage {
    labels: Array2<usize>,
    palette: Vec<[u8; 3]>,
}

impl PaletteImage {
    /// Decode a PNG once and label its pixels
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened or decoded
    /// - The pixels are not stored as 8-bit RGB
    /// - The image is not exactly 64x64
    pub fn from_png_path(path: &Path) -> Result<Self> {
        let image = load_rgb_png(path)?;
        let (width, height) = (image.width() as usize, image.height() as usize);
        Self::from_rgb_bytes(width, height, image.as_raw())
    }

    /// Label a packed row-major RGB buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions differ from the grid or the buffer
    /// length does not match them
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        if width != GRID_WIDTH || height != GRID_HEIGHT {
            return Err(AlgorithmError::InvalidDimensions {
                width,
                height,
                expected: (GRID_WIDTH, GRID_HEIGHT),
            });
        }
        if bytes.len() != width * height * CHANNELS {
            return Err(invalid_parameter(
                "bytes",
                &bytes.len(),
                &format!("expected {} bytes of packed RGB", width * height * CHANNELS),
            ));
        }

        let pixels: Vec<[u8; 3]> = bytes
            .chunks_exact(CHANNELS)
            .map(|chunk| {
                let mut rgb = [0; 3];
                rgb.copy_from_slice(chunk);
                rgb
            })
            .collect();

        // Sorted palette keeps per-color processing order reproducible
        let palette: Vec<[u8; 3]> = pixels
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let lookup: HashMap<[u8; 3], usize> = palette
            .iter()
            .enumerate()
            .map(|(label, &color)| (color, label))
            .collect();

        let labels = Array2::from_shape_fn((height, width), |(row, col)| {
            pixels
                .get(row * width + col)
                .and_then(|color| lookup.get(color))
                .copied()
                .unwrap_or(0)
        });

        Ok(Self { labels, palette })
    }

    /// Distinct colors in ascending RGB order
    pub fn palette(&self) -> &[[u8; 3]] {
        &self.palette
    }

    /// Per-pixel index into the palette, indexed `[row, col]`
    pub const fn labels(&self) -> &Array2<usize> {
        &self.labels
    }

    /// Mask of the cells carrying palette entry `label`
    pub fn mask_for(&self, label: usize) -> Mask {
        Mask::from_cells(
            self.labels
                .indexed_iter()
                .filter(|&(_, &value)| value == label)
                .map(|((row, col), _)| Cell::new(row, col)),
        )
    }

    /// One mask per palette color, in palette order
    pub fn color_masks(&self) -> Vec<([u8; 3], Mask)> {
        self.palette
            .iter()
            .enumerate()
            .map(|(label, &color)| (color, self.mask_for(label)))
            .collect()
    }
}
