//! Tests for palette extraction and per-color masks

#[cfg(test)]
mod tests {
    use bricktile::AlgorithmError;
    use bricktile::analysis::palette::PaletteImage;
    use bricktile::spatial::mask::{CELL_COUNT, Cell};
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn two_color_image() -> RgbImage {
        RgbImage::from_fn(64, 64, |x, y| {
            if x < 8 && y < 2 {
                Rgb([200, 10, 10])
            } else {
                Rgb([0, 0, 255])
            }
        })
    }

    // Tests that the palette is sorted and labels index into it
    // Verified by keeping palette colors in first-seen order
    #[test]
    fn test_palette_sorted() {
        let image = two_color_image();
        let palette = PaletteImage::from_rgb_bytes(64, 64, image.as_raw()).expect("valid image");
        assert_eq!(palette.palette(), &[[0, 0, 255], [200, 10, 10]]);
        assert_eq!(palette.labels().dim(), (64, 64));
        assert_eq!(palette.labels()[(0, 0)], 1);
        assert_eq!(palette.labels()[(2, 0)], 0);
    }

    // Tests that per-color masks partition the grid
    // Verified by transposing rows and columns in mask_for
    #[test]
    fn test_masks_partition_grid() {
        let image = two_color_image();
        let palette = PaletteImage::from_rgb_bytes(64, 64, image.as_raw()).expect("valid image");
        let masks = palette.color_masks();
        assert_eq!(masks.len(), 2);

        let total: usize = masks.iter().map(|(_, mask)| mask.open_count()).sum();
        assert_eq!(total, CELL_COUNT);

        let (color, red) = &masks[1];
        assert_eq!(*color, [200, 10, 10]);
        assert_eq!(red.open_count(), 16);
        assert!(red.is_open(Cell::new(1, 7)));
        assert!(!red.is_open(Cell::new(7, 1)));
    }

    // Tests that images of the wrong size are rejected
    // Verified by accepting any square image
    #[test]
    fn test_wrong_dimensions() {
        let bytes = vec![0; 32 * 32 * 3];
        let result = PaletteImage::from_rgb_bytes(32, 32, &bytes);
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidDimensions {
                width: 32,
                height: 32,
                expected: (64, 64)
            })
        ));
    }

    // Tests that a truncated buffer is rejected
    // Verified by removing the length check
    #[test]
    fn test_short_buffer() {
        let bytes = vec![0; 64 * 64 * 3 - 1];
        let result = PaletteImage::from_rgb_bytes(64, 64, &bytes);
        assert!(matches!(result, Err(AlgorithmError::InvalidParameter { .. })));
    }

    // Tests loading a PNG from disk
    // Verified by decoding with to_rgb8 conversion
    #[test]
    fn test_from_png_path() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("art.png");
        two_color_image().save(&path).expect("save png");

        let palette = PaletteImage::from_png_path(&path).expect("valid image");
        assert_eq!(palette.palette().len(), 2);
    }

    // Tests that images with an alpha channel fail before any masks are built
    // Verified by converting every image to RGB
    #[test]
    fn test_rgba_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(64, 64, Rgba([1, 2, 3, 255]))
            .save(&path)
            .expect("save png");

        let result = PaletteImage::from_png_path(&path);
        assert!(matches!(
            result,
            Err(AlgorithmError::UnsupportedPixelFormat { .. })
        ));
    }
}
