//! Output shape masks.
//!
//! ## Shapes
//!
//! - **Rectangle**: the whole output raster is kept
//! - **Rounded**: the raster is shrunk by an inset on every side and the
//!   corners of the remaining interior are rounded
//!
//! ## Resolution independence
//!
//! Masks are built for the *resized* raster, so `corner_radius_px` and
//! `inset_px` are final output pixels. A 4000px source and a 800px source
//! exported at 640x480 get exactly the same corners.

pub mod apply;
pub mod rounded;

pub use apply::{apply_mask, flatten_onto, Fill};
pub use rounded::RoundedRect;

use serde::{Deserialize, Serialize};

/// Output shape selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Rectangle,
    Rounded,
}

/// Shape parameters shared by every file of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeConfig {
    pub shape: Shape,
    /// Requested corner radius in output pixels; clamped per region.
    pub corner_radius_px: u32,
    /// Inset from every edge in output pixels; clamped per region.
    pub inset_px: u32,
}

impl ShapeConfig {
    pub fn rectangle() -> Self {
        Self::default()
    }

    pub fn rounded(corner_radius_px: u32, inset_px: u32) -> Self {
        Self {
            shape: Shape::Rounded,
            corner_radius_px,
            inset_px,
        }
    }
}

/// Resolved mask geometry for one region size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaskDescriptor {
    /// Every pixel is kept.
    Full,
    /// Pixels whose centre lies inside the rounded interior are kept.
    Rounded(RoundedRect),
    /// The inset consumed the whole region; nothing is kept.
    Empty,
}

impl MaskDescriptor {
    /// Whether the pixel at (x, y) survives the mask.
    #[inline]
    pub fn keeps(&self, x: u32, y: u32) -> bool {
        match self {
            MaskDescriptor::Full => true,
            MaskDescriptor::Rounded(rect) => rect.contains(x as f32 + 0.5, y as f32 + 0.5),
            MaskDescriptor::Empty => false,
        }
    }

    /// Corner radius actually applied, in pixels.
    pub fn effective_radius(&self) -> f32 {
        match self {
            MaskDescriptor::Rounded(rect) => rect.radius,
            _ => 0.0,
        }
    }

    /// True when no pixel can be masked out.
    pub fn is_full(&self) -> bool {
        matches!(self, MaskDescriptor::Full)
    }
}

/// Resolve `shape` for a `region_w x region_h` raster.
///
/// The inset is clamped to half the smaller dimension and the radius to half
/// the smaller interior dimension. Neither clamp is an error.
pub fn build_mask(shape: &ShapeConfig, region_w: u32, region_h: u32) -> MaskDescriptor {
    match shape.shape {
        Shape::Rectangle => MaskDescriptor::Full,
        Shape::Rounded => {
            let inset = shape.inset_px.min(region_w / 2).min(region_h / 2);
            let inner_w = region_w - inset * 2;
            let inner_h = region_h - inset * 2;
            if inner_w == 0 || inner_h == 0 {
                return MaskDescriptor::Empty;
            }

            let max_radius = inner_w.min(inner_h) as f32 / 2.0;
            let radius = (shape.corner_radius_px as f32).min(max_radius);
            if radius == 0.0 && inset == 0 {
                return MaskDescriptor::Full;
            }

            MaskDescriptor::Rounded(RoundedRect::new(
                inset as f32,
                inset as f32,
                inner_w as f32,
                inner_h as f32,
                radius,
            ))
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
