//! Image decoding pipeline for PixelCut.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and WebP sources into an owned RGBA buffer
//! - Correcting EXIF orientation so the crop rectangle means the same thing
//!   the user saw in the preview
//! - Exact-size resizing with a shared filter
//!
//! All operations are synchronous. The batch exporter calls them from its
//! worker thread, one file at a time.

mod source;
mod orientation;
mod resize;
mod types;

pub use source::{decode_image, read_dimensions, read_image};
pub use orientation::{get_orientation, Orientation};
pub use resize::resize;
pub use types::{DecodeError, DecodedImage, FilterType};
