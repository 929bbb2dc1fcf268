//! Mask application and background flattening.

use super::MaskDescriptor;
use crate::decode::DecodedImage;

/// What masked-out pixels become.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// Fully transparent black.
    Transparent,
    /// Opaque RGB color.
    Color([u8; 3]),
}

impl Fill {
    fn rgba(self) -> [u8; 4] {
        match self {
            Fill::Transparent => [0, 0, 0, 0],
            Fill::Color([r, g, b]) => [r, g, b, 255],
        }
    }
}

/// Replace every pixel outside `mask` with `fill`, in place.
///
/// `mask` must have been built for this image's dimensions.
pub fn apply_mask(image: &mut DecodedImage, mask: &MaskDescriptor, fill: Fill) {
    if mask.is_full() {
        return;
    }

    let fill = fill.rgba();
    for y in 0..image.height {
        for x in 0..image.width {
            if !mask.keeps(x, y) {
                let idx = image.index_of(x, y);
                image.pixels[idx..idx + 4].copy_from_slice(&fill);
            }
        }
    }
}

/// Composite RGBA pixels onto an opaque background, returning RGB bytes.
///
/// Used for codecs without alpha and for PNG exports without transparency.
pub fn flatten_onto(image: &DecodedImage, background: [u8; 3]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(image.pixel_count() * 3);
    for px in image.pixels.chunks_exact(4) {
        let alpha = px[3] as u32;
        for c in 0..3 {
            let blended = (px[c] as u32 * alpha + background[c] as u32 * (255 - alpha) + 127) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}
