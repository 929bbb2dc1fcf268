//! Decoding of PNG, JPEG and WebP sources into owned RGBA buffers.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};

use super::{get_orientation, DecodeError, DecodedImage};

/// Decode an encoded image, applying EXIF orientation.
///
/// The format is sniffed from the bytes, not taken from the file extension,
/// so a mislabeled `.jpg` that is really a PNG still decodes.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for empty input or a format other than
/// PNG, JPEG or WebP, and `DecodeError::CorruptedFile` when the decoder fails
/// (truncated data, bad checksums, unsupported bit depth).
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    match reader.format() {
        Some(ImageFormat::Jpeg) if !has_jpeg_eoi(bytes) => {
            return Err(DecodeError::CorruptedFile("truncated JPEG".to_string()));
        }
        Some(ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP) => {}
        _ => return Err(DecodeError::InvalidFormat),
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let upright = get_orientation(bytes).apply(img);
    let decoded = DecodedImage::from_rgba_image(upright.into_rgba8());
    if decoded.is_empty() {
        return Err(DecodeError::InvalidDimensions {
            width: decoded.width,
            height: decoded.height,
        });
    }
    Ok(decoded)
}

/// Whether a JPEG stream ends with the EOI marker (`FF D9`).
///
/// The JPEG decoder fills missing scanlines of a cut-off file instead of
/// failing, so truncation has to be detected up front. Trailing zero, `FF`
/// or whitespace padding after the marker is allowed.
fn has_jpeg_eoi(bytes: &[u8]) -> bool {
    let end = bytes
        .iter()
        .rposition(|&b| !matches!(b, 0x00 | 0xFF | b' ' | b'\r' | b'\n' | b'\t'))
        .map_or(0, |i| i + 1);
    bytes[..end].ends_with(&[0xFF, 0xD9])
}

/// Read and decode an image file.
pub fn read_image(path: &Path) -> Result<DecodedImage, DecodeError> {
    let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    decode_image(&bytes)
}

/// Upright dimensions of an image file without decoding its pixels.
///
/// Used to normalize a pointer selection against a reference image.
pub fn read_dimensions(path: &Path) -> Result<(u32, u32), DecodeError> {
    let bytes = std::fs::read(path).map_err(|e| DecodeError::IoError(e.to_string()))?;
    let (width, height) = ImageReader::new(Cursor::new(bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?
        .into_dimensions()
        .map_err(|_| DecodeError::InvalidFormat)?;
    Ok(get_orientation(&bytes).oriented(width, height))
}
