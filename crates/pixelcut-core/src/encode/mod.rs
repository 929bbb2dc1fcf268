//! Image encoding pipeline for PixelCut.
//!
//! This module provides functionality for:
//! - Encoding PNG, with or without an alpha channel
//! - Encoding JPEG with configurable quality
//! - Encoding lossless WebP
//!
//! Only PNG carries alpha. JPEG and WebP exports are always flattened onto an
//! opaque background before they reach these encoders.

mod jpeg;
mod png;
mod webp;

pub use jpeg::encode_jpeg;
pub use png::encode_png;
pub use webp::encode_webp;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("{codec} encoding failed: {message}")]
    EncodingFailed { codec: Codec, message: String },

    /// The encoder finished without producing any bytes
    #[error("{0} encoder produced no output")]
    EmptyOutput(Codec),
}

/// Pixel layout handed to an encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Rgb8,
    Rgba8,
}

impl PixelLayout {
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb8 => 3,
            PixelLayout::Rgba8 => 4,
        }
    }

    fn color_type(self) -> image::ExtendedColorType {
        match self {
            PixelLayout::Rgb8 => image::ExtendedColorType::Rgb8,
            PixelLayout::Rgba8 => image::ExtendedColorType::Rgba8,
        }
    }
}

/// Output codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    Png,
    Jpeg,
    #[serde(rename = "webp")]
    WebP,
}

impl Codec {
    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Codec::Png => "png",
            Codec::Jpeg => "jpg",
            Codec::WebP => "webp",
        }
    }

    /// Map a source extension (case-insensitive, no dot) to a codec.
    pub fn from_extension(ext: &str) -> Option<Codec> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Codec::Png),
            "jpg" | "jpeg" => Some(Codec::Jpeg),
            "webp" => Some(Codec::WebP),
            _ => None,
        }
    }

    /// Whether the codec can store per-pixel alpha.
    pub fn supports_alpha(self) -> bool {
        matches!(self, Codec::Png)
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Codec::Png => "PNG",
            Codec::Jpeg => "JPEG",
            Codec::WebP => "WebP",
        })
    }
}

impl std::str::FromStr for Codec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Codec::from_extension(s).ok_or_else(|| format!("unknown codec '{s}' (expected png, jpeg or webp)"))
    }
}

/// Check dimensions and buffer length shared by every encoder.
fn validate(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = width as usize * height as usize * layout.channels();
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

fn finish(codec: Codec, bytes: Vec<u8>) -> Result<Vec<u8>, EncodeError> {
    if bytes.is_empty() {
        return Err(EncodeError::EmptyOutput(codec));
    }
    Ok(bytes)
}
