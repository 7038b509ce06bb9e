//! Auto-resize preprocessor for uploaded images.
//!
//! Downsamples oversized sources to a recommended bound before they enter
//! the crop engine or are embedded inline.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::io::Cursor;

use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, GenericImageView};

use crate::error::{Error, Result};

/// JPEG quality for preprocessor output
pub const RESIZE_JPEG_QUALITY: u8 = 90;

/// Bounding box an auto-resized image must fit in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeBounds {
    /// Maximum output width in pixels
    pub max_width: u32,
    /// Maximum output height in pixels
    pub max_height: u32,
}

impl Default for ResizeBounds {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 600,
        }
    }
}

/// Compute output dimensions fitting `(max_w, max_h)` with the input ratio.
///
/// Landscape sources bound width first, then re-derive from height when the
/// height cap fires; portrait sources are symmetric with height as the
/// primary bound. `w == h` lands in the height-primary branch; both
/// branches agree for squares. Inputs already inside the bound come back
/// unchanged, never upscaled.
#[must_use]
pub fn constrain_dimensions(width: f64, height: f64, max_w: f64, max_h: f64) -> (f64, f64) {
    let aspect_ratio = width / height;

    if width > height {
        let mut new_w = width.min(max_w);
        let mut new_h = new_w / aspect_ratio;
        if new_h > max_h {
            new_h = max_h;
            new_w = new_h * aspect_ratio;
        }
        (new_w, new_h)
    } else {
        let mut new_h = height.min(max_h);
        let mut new_w = new_h * aspect_ratio;
        if new_w > max_w {
            new_w = max_w;
            new_h = new_w / aspect_ratio;
        }
        (new_w, new_h)
    }
}

/// Scale an image to fit within `bounds`, preserving aspect ratio.
///
/// Returns the source unchanged when it already fits.
pub fn auto_resize(source: &DynamicImage, bounds: ResizeBounds) -> Result<DynamicImage> {
    if bounds.max_width == 0 || bounds.max_height == 0 {
        return Err(Error::InvalidInput(
            "Resize bounds must be greater than zero".to_string(),
        ));
    }

    let (width, height) = source.dimensions();
    if width <= bounds.max_width && height <= bounds.max_height {
        return Ok(source.clone());
    }

    let (new_w, new_h) = constrain_dimensions(
        f64::from(width),
        f64::from(height),
        f64::from(bounds.max_width),
        f64::from(bounds.max_height),
    );
    let new_w = (new_w.round() as u32).max(1);
    let new_h = (new_h.round() as u32).max(1);

    tracing::debug!(width, height, new_w, new_h, "Auto-resizing oversized image");
    Ok(source.resize_exact(new_w, new_h, FilterType::Lanczos3))
}

/// Encode an image as JPEG at the given quality.
///
/// The buffer converts to RGB first; JPEG carries no alpha channel.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    let rgb = image.to_rgb8();
    let mut encoder = JpegEncoder::new_with_quality(&mut cursor, quality);
    encoder
        .encode_image(&rgb)
        .map_err(|error| Error::InvalidInput(format!("Failed to encode JPEG: {error}")))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use pretty_assertions::assert_eq;

    fn source_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(ImageBuffer::<Rgba<u8>, Vec<u8>>::from_fn(
            width,
            height,
            |_x, _y| Rgba([200, 90, 30, 255]),
        ))
    }

    #[test]
    fn images_inside_the_bound_pass_through_unchanged() {
        let source = source_image(800, 600);
        let result = auto_resize(&source, ResizeBounds::default()).unwrap();
        assert_eq!(result.dimensions(), (800, 600));

        let small = source_image(64, 48);
        let result = auto_resize(&small, ResizeBounds::default()).unwrap();
        assert_eq!(result.dimensions(), (64, 48));
    }

    #[test]
    fn wide_landscape_fits_bound_and_keeps_ratio() {
        let source = source_image(1600, 800);
        let result = auto_resize(&source, ResizeBounds::default()).unwrap();

        let (w, h) = result.dimensions();
        assert!(w <= 800 && h <= 600);
        let ratio = f64::from(w) / f64::from(h);
        assert!((ratio - 2.0).abs() < 0.01);
    }

    #[test]
    fn tall_portrait_bounds_height_first() {
        let (w, h) = constrain_dimensions(600.0, 1200.0, 800.0, 600.0);
        assert!((w - 300.0).abs() < 1e-9);
        assert!((h - 600.0).abs() < 1e-9);
    }

    #[test]
    fn landscape_rederives_when_height_cap_fires() {
        // 900x800 -> width branch gives 800x711.1, height cap re-derives
        let (w, h) = constrain_dimensions(900.0, 800.0, 800.0, 600.0);
        assert!((h - 600.0).abs() < 1e-9);
        assert!((w - 675.0).abs() < 1e-9);
    }

    #[test]
    fn square_takes_the_height_primary_branch() {
        let (w, h) = constrain_dimensions(1000.0, 1000.0, 800.0, 600.0);
        assert!((w - 600.0).abs() < 1e-9);
        assert!((h - 600.0).abs() < 1e-9);
    }

    #[test]
    fn auto_resize_rejects_zero_bounds() {
        let source = source_image(10, 10);
        let result = auto_resize(
            &source,
            ResizeBounds {
                max_width: 0,
                max_height: 600,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn encode_jpeg_flattens_alpha_and_produces_jpeg_bytes() {
        let source = source_image(32, 20);
        let bytes = encode_jpeg(&source, RESIZE_JPEG_QUALITY).unwrap();

        let format = image::guess_format(&bytes).unwrap();
        assert_eq!(format, image::ImageFormat::Jpeg);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (32, 20));
    }
}
