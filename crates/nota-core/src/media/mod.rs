//! Image pipeline: upload validation, auto-resize preprocessor, and the
//! fixed-aspect crop engine.

mod crop;
mod resize;
mod upload;

pub use crop::{
    CropEngine, CropPhase, OverlayFrame, Rect, ASPECT_RATIO, CROP_JPEG_QUALITY, HANDLE_SIZE,
    HANDLE_TOLERANCE, MIN_SELECTION_WIDTH, OUTPUT_HEIGHT, OUTPUT_WIDTH,
};
pub use resize::{
    auto_resize, constrain_dimensions, encode_jpeg, ResizeBounds, RESIZE_JPEG_QUALITY,
};
pub use upload::{
    decode_upload, jpeg_data_uri, parse_data_uri, validate_upload, MAX_UPLOAD_BYTES,
};

use image::GenericImageView;

use crate::error::Result;

/// Run the full attach pipeline on uploaded bytes.
///
/// Validates and decodes the upload, auto-resizes it to the recommended
/// bound, starts a crop session on the fitted display canvas with the
/// default selection (or the explicit `(x, y, width)` region), applies the
/// crop, and returns the inline data URI stored on notes.
pub fn process_upload(bytes: &[u8], region: Option<(f64, f64, f64)>) -> Result<String> {
    let decoded = decode_upload(bytes)?;
    let resized = auto_resize(&decoded, ResizeBounds::default())?;

    let (width, height) = resized.dimensions();
    let (canvas_w, canvas_h) = CropEngine::fit_canvas(width, height);

    let mut engine = CropEngine::new();
    engine.begin(width, height, canvas_w, canvas_h)?;
    if let Some((x, y, selection_width)) = region {
        engine.set_selection(x, y, selection_width)?;
    }

    let jpeg = engine.apply(&resized)?;
    Ok(jpeg_data_uri(&jpeg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgba};
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn source_png(width: u32, height: u32) -> Vec<u8> {
        let image = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 120, 255])
        });

        let mut cursor = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut cursor, ImageFormat::Png)
            .unwrap();
        cursor.into_inner()
    }

    #[test]
    fn process_upload_produces_card_sized_data_uri() {
        let bytes = source_png(1600, 900);
        let uri = process_upload(&bytes, None).unwrap();

        let jpeg = parse_data_uri(&uri).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (OUTPUT_WIDTH, OUTPUT_HEIGHT));
    }

    #[test]
    fn process_upload_accepts_explicit_region() {
        let bytes = source_png(640, 480);
        let uri = process_upload(&bytes, Some((20.0, 20.0, 160.0))).unwrap();

        let jpeg = parse_data_uri(&uri).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (OUTPUT_WIDTH, OUTPUT_HEIGHT));
    }

    #[test]
    fn process_upload_rejects_non_image_bytes() {
        assert!(process_upload(b"not an image", None).is_err());
    }
}
