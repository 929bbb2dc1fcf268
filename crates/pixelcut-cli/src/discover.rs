//! Input directory enumeration.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pixelcut_core::ImageEntry;

/// Lower-cased extensions picked up from an input directory.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// List the supported images directly inside `dir`, sorted by name
/// without regard to case. Subdirectories are not descended into.
pub fn list_images(dir: &Path) -> Result<Vec<ImageEntry>> {
    let read_dir =
        fs::read_dir(dir).with_context(|| format!("failed to read folder {}", dir.display()))?;

    let mut images = Vec::new();
    for entry in read_dir {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let image = ImageEntry::from_path(path);
        if SUPPORTED_EXTENSIONS.contains(&image.ext.as_str()) {
            images.push(image);
        }
    }

    images.sort_by_cached_key(|image| image.name.to_lowercase());
    tracing::debug!(dir = %dir.display(), count = images.len(), "listed images");
    Ok(images)
}
