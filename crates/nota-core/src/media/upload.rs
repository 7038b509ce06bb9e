//! Upload validation and inline data-URI payloads.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::DynamicImage;

use crate::error::{Error, Result};

/// Upload size cap, matching the original client's 5 MB alert
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Validate an uploaded payload without fully decoding it.
///
/// Rejects empty payloads, payloads over the size cap, and bytes that are
/// not a recognizable image format.
pub fn validate_upload(bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() {
        return Err(Error::InvalidInput("Upload cannot be empty".to_string()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(Error::InvalidInput(
            "Image size should be less than 5MB".to_string(),
        ));
    }
    image::guess_format(bytes)
        .map_err(|_| Error::InvalidInput("Please select an image file".to_string()))?;
    Ok(())
}

/// Validate and decode an uploaded image
pub fn decode_upload(bytes: &[u8]) -> Result<DynamicImage> {
    validate_upload(bytes)?;
    image::load_from_memory(bytes)
        .map_err(|error| Error::InvalidInput(format!("Failed to decode image: {error}")))
}

/// Wrap encoded JPEG bytes as the inline data URI stored on notes
#[must_use]
pub fn jpeg_data_uri(bytes: &[u8]) -> String {
    format!("{DATA_URI_PREFIX}{}", BASE64.encode(bytes))
}

/// Extract the JPEG bytes from an inline data URI
pub fn parse_data_uri(value: &str) -> Result<Vec<u8>> {
    let payload = value
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| Error::InvalidInput("Not a JPEG data URI".to_string()))?;
    BASE64
        .decode(payload)
        .map_err(|error| Error::InvalidInput(format!("Invalid data URI payload: {error}")))
}
