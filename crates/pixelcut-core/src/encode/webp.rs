//! WebP encoding for export.
//!
//! The `image` crate ships a pure-Rust lossless WebP encoder, so exports stay
//! free of libwebp. Input is RGB: WebP exports are always flattened.

use image::codecs::webp::WebPEncoder;
use image::ImageEncoder;

use super::{finish, validate, Codec, EncodeError, PixelLayout};

/// Encode RGB pixel data to lossless WebP bytes.
pub fn encode_webp(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height, PixelLayout::Rgb8)?;

    let mut buffer = Vec::new();
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(pixels, width, height, PixelLayout::Rgb8.color_type())
        .map_err(|e| EncodeError::EncodingFailed {
            codec: Codec::WebP,
            message: e.to_string(),
        })?;

    finish(Codec::WebP, buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_webp_riff_header() {
        let pixels = vec![64u8; 10 * 10 * 3];
        let webp = encode_webp(&pixels, 10, 10).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
        assert_eq!(&webp[8..12], b"WEBP");
    }

    #[test]
    fn test_encode_webp_lossless_round_trip() {
        let pixels: Vec<u8> = (0..12 * 5 * 3).map(|i| (i * 13 % 256) as u8).collect();
        let webp = encode_webp(&pixels, 12, 5).unwrap();
        let img = image::load_from_memory(&webp).unwrap().to_rgb8();
        assert_eq!((img.width(), img.height()), (12, 5));
        assert_eq!(img.into_raw(), pixels);
    }

    #[test]
    fn test_encode_webp_zero_dimensions() {
        assert!(matches!(
            encode_webp(&[], 10, 0),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }
}
