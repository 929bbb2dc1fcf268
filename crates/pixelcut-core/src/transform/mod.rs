//! Crop geometry: selection normalization and region extraction.
//!
//! # Coordinate System
//!
//! - All coordinates are in source-image pixels of the upright image
//! - Origin is the top-left corner
//! - A `CropRect` covers columns `x..x+w` and rows `y..y+h`

mod crop;
mod normalize;

pub use crop::{apply_crop, CropRect};
pub use normalize::{normalize, Point};
