//! Per-file processing: read, decode, crop, resize, mask, encode, write.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ExportError, FileError, ValidationError};
use super::types::{validate_target, ExportOptions, ExportRequest};
use crate::decode::{read_image, resize, DecodeError, DecodedImage};
use crate::encode::{encode_jpeg, encode_png, encode_webp, Codec, EncodeError, PixelLayout};
use crate::mask::{apply_mask, build_mask, flatten_onto, Fill, ShapeConfig};
use crate::naming::{resolve_output_path, ImageEntry};
use crate::transform::{apply_crop, CropRect};
use crate::TargetSize;

/// Resize a cropped region to `target`, mask it in output pixels and encode.
///
/// # Arguments
///
/// * `cropped` - The cropped source region
/// * `target` - Exact output dimensions
/// * `codec` - Output codec
/// * `shape` - Mask shape; radius and inset are output pixels
/// * `options` - Transparency, background, quality and filter
///
/// PNG keeps alpha only when `options.transparent_png` is set. Every other
/// combination is flattened onto `options.background` and written as RGB.
pub fn resize_and_encode(
    cropped: &DecodedImage,
    target: TargetSize,
    codec: Codec,
    shape: &ShapeConfig,
    options: &ExportOptions,
) -> Result<Vec<u8>, EncodeError> {
    let mut resized = resize(cropped, target.w, target.h, options.filter).map_err(|e| match e {
        DecodeError::InvalidDimensions { width, height } => {
            EncodeError::InvalidDimensions { width, height }
        }
        other => EncodeError::EncodingFailed {
            codec,
            message: other.to_string(),
        },
    })?;

    let mask = build_mask(shape, resized.width, resized.height);
    let keep_alpha = codec.supports_alpha() && options.transparent_png;

    if keep_alpha {
        apply_mask(&mut resized, &mask, Fill::Transparent);
        return encode_png(&resized.pixels, resized.width, resized.height, PixelLayout::Rgba8);
    }

    apply_mask(&mut resized, &mask, Fill::Color(options.background));
    let rgb = flatten_onto(&resized, options.background);
    match codec {
        Codec::Png => encode_png(&rgb, resized.width, resized.height, PixelLayout::Rgb8),
        Codec::Jpeg => encode_jpeg(&rgb, resized.width, resized.height, options.jpeg_quality),
        Codec::WebP => encode_webp(&rgb, resized.width, resized.height),
    }
}

/// Run the whole pipeline for one batch entry and return the written path.
///
/// The request's crop is clamped to this file's dimensions; a crop that
/// clamps to nothing fails with [`FileError::CropOutside`].
pub fn process_entry(request: &ExportRequest, entry: &ImageEntry) -> Result<PathBuf, FileError> {
    let options = &request.options;
    let codec = options.output_format.codec_for(entry);

    let image = read_image(&entry.path)?;
    let cropped = apply_crop(&image, &request.crop).ok_or(FileError::CropOutside {
        crop: request.crop,
        width: image.width,
        height: image.height,
    })?;

    let bytes = resize_and_encode(&cropped, request.target, codec, &request.shape, options)?;

    let path = resolve_output_path(entry, options.filename_mode, codec, &request.output_dir);
    write_output(&path, &bytes)?;
    Ok(path)
}

/// Export one file to an explicit output path.
///
/// Unlike batch export, the crop must lie entirely inside the source image.
/// The codec comes from the output path's extension, falling back to the
/// configured output format.
pub fn export_single(
    input: &Path,
    output: &Path,
    crop: CropRect,
    shape: &ShapeConfig,
    target: TargetSize,
    options: &ExportOptions,
) -> Result<(), ExportError> {
    if crop.is_empty() {
        return Err(ValidationError::EmptyCrop { crop }.into());
    }
    validate_target(target)?;

    let image = read_image(input).map_err(FileError::from)?;
    if !crop.fits_within(image.width, image.height) {
        return Err(FileError::CropOutside {
            crop,
            width: image.width,
            height: image.height,
        }
        .into());
    }

    let codec = output
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(Codec::from_extension)
        .unwrap_or_else(|| options.output_format.codec_for(&ImageEntry::from_path(input)));

    let cropped = apply_crop(&image, &crop).ok_or(FileError::CropOutside {
        crop,
        width: image.width,
        height: image.height,
    })?;
    let bytes = resize_and_encode(&cropped, target, codec, shape, options).map_err(FileError::from)?;
    write_output(output, &bytes)?;

    tracing::info!(input = %input.display(), output = %output.display(), "exported single file");
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), FileError> {
    let write_err = |e: std::io::Error| FileError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, bytes).map_err(write_err)
}
