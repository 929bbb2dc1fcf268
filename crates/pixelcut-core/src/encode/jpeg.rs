//! JPEG encoding for export.
//!
//! JPEG has no alpha channel: callers pass RGB data that has already been
//! composited onto the background color.

use image::codecs::jpeg::JpegEncoder;
use image::ImageEncoder;

use super::{finish, validate, Codec, EncodeError, PixelLayout};

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height, PixelLayout::Rgb8)?;

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(pixels, width, height, PixelLayout::Rgb8.color_type())
        .map_err(|e| EncodeError::EncodingFailed {
            codec: Codec::Jpeg,
            message: e.to_string(),
        })?;

    finish(Codec::Jpeg, buffer)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
