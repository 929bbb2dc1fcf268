//! Pixel-space cropping.
//!
//! A batch run defines its crop rectangle once, against a reference image,
//! and reuses it for every file. Files whose dimensions differ from the
//! reference get the rectangle clamped to their own bounds.

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// Axis-aligned crop region in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// True when no crop is selected (zero width or height).
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u64 {
        self.x as u64 + self.w as u64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u64 {
        self.y as u64 + self.h as u64
    }

    /// Check that the rectangle lies fully inside a `width x height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }

    /// Intersect with the bounds of a `width x height` image.
    ///
    /// The result may be empty when the rectangle starts past the image edge.
    pub fn clamp_to(&self, width: u32, height: u32) -> CropRect {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let right = self.right().min(width as u64) as u32;
        let bottom = self.bottom().min(height as u64) as u32;
        CropRect {
            x,
            y,
            w: right - x,
            h: bottom - y,
        }
    }
}

impl std::fmt::Display for CropRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.w, self.h, self.x, self.y)
    }
}

/// Extract `rect` from `image`, clamped to the image bounds.
///
/// Returns `None` when the clamped region has zero area.
pub fn apply_crop(image: &DecodedImage, rect: &CropRect) -> Option<DecodedImage> {
    let rect = rect.clamp_to(image.width, image.height);
    if rect.is_empty() {
        return None;
    }

    // Fast path: full-frame crop returns a clone
    if rect.w == image.width && rect.h == image.height {
        return Some(image.clone());
    }

    let row_bytes = rect.w as usize * DecodedImage::CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * rect.h as usize);

    // Rows are contiguous in both buffers, so copy a row at a time
    for src_y in rect.y..rect.y + rect.h {
        let start = image.index_of(rect.x, src_y);
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Some(DecodedImage::new(rect.w, rect.h, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=64, 1u32..=64)
    }

    fn rect_strategy() -> impl Strategy<Value = CropRect> {
        (0u32..=80, 0u32..=80, 0u32..=80, 0u32..=80)
            .prop_map(|(x, y, w, h)| CropRect::new(x, y, w, h))
    }

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    proptest! {
        /// Property: Clamped rectangles never leave the image.
        #[test]
        fn prop_clamp_within_bounds(
            (width, height) in dimensions_strategy(),
            rect in rect_strategy(),
        ) {
            let clamped = rect.clamp_to(width, height);
            prop_assert!(clamped.fits_within(width, height));
            prop_assert!(clamped.w <= rect.w && clamped.h <= rect.h);
        }

        /// Property: Output matches the clamped rectangle and its source pixels.
        #[test]
        fn prop_crop_matches_source(
            (width, height) in dimensions_strategy(),
            rect in rect_strategy(),
        ) {
            let img = create_test_image(width, height);
            let clamped = rect.clamp_to(width, height);

            match apply_crop(&img, &rect) {
                None => prop_assert!(clamped.is_empty()),
                Some(out) => {
                    prop_assert_eq!((out.width, out.height), (clamped.w, clamped.h));
                    prop_assert_eq!(out.pixels.len(), out.pixel_count() * 4);
                    prop_assert_eq!(out.pixel(0, 0), img.pixel(clamped.x, clamped.y));
                    prop_assert_eq!(
                        out.pixel(out.width - 1, out.height - 1),
                        img.pixel(clamped.x + clamped.w - 1, clamped.y + clamped.h - 1)
                    );
                }
            }
        }
    }
}
