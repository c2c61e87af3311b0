//! Raster border transform - handles all static image related logic
//!
//! Includes:
//! - Image decoding from the in-memory payload
//! - Canvas allocation and border fill
//! - Compositing the source pixels onto the enlarged canvas
//! - Deterministic re-encoding back to a binary blob

use crate::common::errors::TransformError;
use image::{DynamicImage, GenericImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

// ────────────────────────────────────────────────────────────────
// Public API
// ────────────────────────────────────────────────────────────────

/// Render `bytes` onto a canvas enlarged by `width_px` on every side,
/// filled with `color`, and re-encode.
///
/// The source pixels land at offset `(width_px, width_px)` unblended, so
/// the original image region is reproduced exactly. A width of zero
/// yields a canvas of the original dimensions.
///
/// Decode is the dominant cost; callers run this on a blocking thread.
pub fn apply_image_border(
    bytes: &[u8],
    color: Rgba<u8>,
    width_px: u32,
) -> Result<Vec<u8>, TransformError> {
    // Sniff before decoding so the output format can follow the input.
    let sniffed = image::guess_format(bytes).ok();

    let source = image::load_from_memory(bytes)
        .map_err(|err| TransformError::Decode(err.to_string()))?;

    let canvas = composite_onto_border_canvas(&source, color, width_px)?;

    encode_canvas(canvas, output_format(sniffed))
}

// ────────────────────────────────────────────────────────────────
// Canvas Composition
// ────────────────────────────────────────────────────────────────

fn composite_onto_border_canvas(
    source: &DynamicImage,
    color: Rgba<u8>,
    width_px: u32,
) -> Result<RgbaImage, TransformError> {
    let (out_width, out_height) = bordered_dimensions(source.width(), source.height(), width_px)
        .ok_or_else(|| {
            TransformError::Encode("bordered canvas dimensions overflow u32".to_owned())
        })?;

    let mut canvas = RgbaImage::from_pixel(out_width, out_height, color);
    canvas
        .copy_from(&source.to_rgba8(), width_px, width_px)
        .map_err(|err| TransformError::Encode(err.to_string()))?;

    Ok(canvas)
}

/// `(w + 2·border, h + 2·border)`, or `None` on overflow.
pub fn bordered_dimensions(width: u32, height: u32, border: u32) -> Option<(u32, u32)> {
    let band = border.checked_mul(2)?;
    Some((width.checked_add(band)?, height.checked_add(band)?))
}

// ────────────────────────────────────────────────────────────────
// Encoding
// ────────────────────────────────────────────────────────────────

/// Keep the sniffed input format when the `image` crate can encode it,
/// fall back to PNG otherwise (gif/webp/heif inputs and unknown blobs).
fn output_format(sniffed: Option<ImageFormat>) -> ImageFormat {
    match sniffed {
        Some(format @ (ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp | ImageFormat::Tiff)) => {
            format
        }
        _ => ImageFormat::Png,
    }
}

fn encode_canvas(canvas: RgbaImage, format: ImageFormat) -> Result<Vec<u8>, TransformError> {
    let mut buffer = Cursor::new(Vec::new());

    let write_result = if format == ImageFormat::Jpeg {
        // JPEG has no alpha channel
        DynamicImage::ImageRgba8(canvas)
            .to_rgb8()
            .write_to(&mut buffer, format)
    } else {
        DynamicImage::ImageRgba8(canvas).write_to(&mut buffer, format)
    };

    write_result.map_err(|err| TransformError::Encode(err.to_string()))?;
    Ok(buffer.into_inner())
}

// ────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn patterned_png(width: u32, height: u32) -> Vec<u8> {
        let source = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([x as u8, y as u8, 100, 255])
        });
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(source)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn hundred_square_with_five_black() {
        let input = patterned_png(100, 100);
        let output = apply_image_border(&input, BLACK, 5).unwrap();

        let decoded = image::load_from_memory(&output).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (110, 110));

        // Outer 5px ring is solid black.
        for (x, y, pixel) in decoded.enumerate_pixels() {
            let in_ring = x < 5 || x >= 105 || y < 5 || y >= 105;
            if in_ring {
                assert_eq!(*pixel, BLACK, "border pixel at ({x}, {y})");
            }
        }

        // Inner 100x100 region reproduces the input exactly.
        let original = image::load_from_memory(&input).unwrap().to_rgba8();
        for (x, y, pixel) in original.enumerate_pixels() {
            assert_eq!(decoded.get_pixel(x + 5, y + 5), pixel, "source pixel at ({x}, {y})");
        }
    }

    #[test]
    fn zero_width_preserves_dimensions() {
        let input = patterned_png(40, 30);
        let output = apply_image_border(&input, BLACK, 0).unwrap();
        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn decode_failure_is_per_item() {
        let err = apply_image_border(b"definitely not an image", BLACK, 5).unwrap_err();
        assert!(matches!(err, TransformError::Decode(_)));
    }

    #[test]
    fn jpeg_input_stays_jpeg() {
        let source = RgbaImage::from_pixel(16, 16, Rgba([200, 10, 10, 255]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(source)
            .to_rgb8()
            .write_to(&mut buffer, ImageFormat::Jpeg)
            .unwrap();

        let output = apply_image_border(&buffer.into_inner(), BLACK, 2).unwrap();
        assert_eq!(image::guess_format(&output).unwrap(), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (20, 20));
    }

    #[test]
    fn gif_input_falls_back_to_png() {
        let source = RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 255]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(source)
            .write_to(&mut buffer, ImageFormat::Gif)
            .unwrap();
        let output = apply_image_border(&buffer.into_inner(), BLACK, 1).unwrap();
        assert_eq!(image::guess_format(&output).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn raster_output_is_deterministic() {
        let input = patterned_png(24, 24);
        let first = apply_image_border(&input, BLACK, 3).unwrap();
        let second = apply_image_border(&input, BLACK, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn dimension_overflow_is_rejected() {
        assert_eq!(bordered_dimensions(u32::MAX - 1, 10, 1), None);
        assert_eq!(bordered_dimensions(10, 10, u32::MAX / 2 + 1), None);
        assert_eq!(bordered_dimensions(100, 100, 5), Some((110, 110)));
    }
}
