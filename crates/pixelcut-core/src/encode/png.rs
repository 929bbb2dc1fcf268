//! PNG encoding for export.

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::ImageEncoder;

use super::{finish, validate, Codec, EncodeError, PixelLayout};

/// Encode RGB or RGBA pixel data to PNG bytes.
///
/// RGBA is used for transparent exports; RGB for exports flattened onto a
/// background. Compression settings are fixed so repeated runs produce
/// byte-identical files.
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height, layout)?;

    let mut buffer = Vec::new();
    PngEncoder::new_with_quality(&mut buffer, CompressionType::Default, PngFilter::Adaptive)
        .write_image(pixels, width, height, layout.color_type())
        .map_err(|e| EncodeError::EncodingFailed {
            codec: Codec::Png,
            message: e.to_string(),
        })?;

    finish(Codec::Png, buffer)
}
