//! PixelCut Core - batch crop, mask and export engine
//!
//! This crate turns a directory's worth of source images into uniformly
//! cropped, masked and resized exports. One crop rectangle, one mask shape and
//! one target size are shared by every file of a run.
//!
//! # Pipeline
//!
//! For each input file the [`export::BatchExporter`] runs:
//! 1. Decode (owned RGBA buffer, EXIF orientation applied)
//! 2. Crop (shared rectangle, clamped to this file's dimensions)
//! 3. Resize to the target size
//! 4. Mask (rounded rectangle with inset, in output pixels)
//! 5. Encode (PNG, JPEG or WebP) and write to the resolved output path
//!
//! A failing file is recorded in the run's [`export::ExportSummary`] and the
//! run moves on to the next file.

pub mod decode;
pub mod encode;
pub mod export;
pub mod mask;
pub mod naming;
pub mod transform;

pub use decode::{decode_image, read_dimensions, DecodedImage, FilterType};
pub use encode::{Codec, EncodeError};
pub use export::{
    export_single, BatchExporter, CancelToken, ExportError, ExportHandle, ExportOptions,
    ExportOutcome, ExportProgress, ExportRequest, ExportSummary, ProgressSink,
};
pub use mask::{build_mask, MaskDescriptor, Shape, ShapeConfig};
pub use naming::{resolve_output_path, FilenameMode, ImageEntry, OutputFormat};
pub use transform::{apply_crop, normalize, CropRect, Point};

/// Largest output raster accepted, in pixels (`w * h`).
///
/// Resizing allocates several buffers of this size; an allocation failure
/// aborts the process rather than failing one file.
pub const MAX_TARGET_PIXELS: u64 = 100_000_000;

/// Fixed output raster dimensions shared by every file of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TargetSize {
    /// Output width in pixels
    pub w: u32,
    /// Output height in pixels
    pub h: u32,
}

impl TargetSize {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Both dimensions are non-zero.
    pub fn is_valid(&self) -> bool {
        self.w > 0 && self.h > 0
    }

    pub fn pixel_count(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Within [`MAX_TARGET_PIXELS`].
    pub fn within_budget(&self) -> bool {
        self.pixel_count() <= MAX_TARGET_PIXELS
    }
}

impl std::fmt::Display for TargetSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_size_valid() {
        assert!(TargetSize::new(640, 480).is_valid());
        assert!(!TargetSize::new(0, 480).is_valid());
        assert!(!TargetSize::new(640, 0).is_valid());
    }

    #[test]
    fn test_target_size_budget() {
        assert!(TargetSize::new(10000, 10000).within_budget());
        assert!(!TargetSize::new(10000, 10001).within_budget());
        assert!(!TargetSize::new(70000, 70000).within_budget());
        assert_eq!(TargetSize::new(u32::MAX, 2).pixel_count(), u32::MAX as u64 * 2);
    }

    #[test]
    fn test_target_size_display() {
        assert_eq!(TargetSize::new(640, 480).to_string(), "640x480");
    }
}
