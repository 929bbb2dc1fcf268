//! Error taxonomy for batch export.
//!
//! - [`ValidationError`]: the run never starts
//! - [`FileError`]: one file is skipped, the run continues
//! - [`ExportError`]: the call itself failed (busy exporter, dead worker)
//!
//! Cancellation is not an error; see [`super::ExportOutcome::Cancelled`].

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::transform::CropRect;
use crate::TargetSize;

/// Inputs rejected before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ValidationError {
    #[error("no crop selected")]
    EmptyCrop { crop: CropRect },

    #[error("target size {target} must be positive")]
    InvalidTargetSize { target: TargetSize },

    #[error("target size {target} exceeds the {max} pixel limit")]
    TargetTooLarge { target: TargetSize, max: u64 },

    #[error("no input images")]
    NoInputs,
}

/// Failure of a single file. The `Display` text is what lands in
/// [`super::ExportSummary::errors`], prefixed with the file name.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("read failed: {0}")]
    Read(String),

    #[error("decode failed")]
    Decode(#[source] DecodeError),

    #[error("crop {crop} lies outside the {width}x{height} image")]
    CropOutside {
        crop: CropRect,
        width: u32,
        height: u32,
    },

    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("write failed: {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    #[error("processing panicked: {0}")]
    Panicked(String),
}

impl From<DecodeError> for FileError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::IoError(message) => FileError::Read(message),
            other => FileError::Decode(other),
        }
    }
}

/// Errors returned by the export entry points themselves.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Another run is still in progress on this exporter.
    #[error("an export is already running")]
    AlreadyRunning,

    /// The worker thread could not be started.
    #[error("failed to start export worker: {0}")]
    Spawn(#[from] std::io::Error),

    /// The worker thread panicked outside per-file processing.
    #[error("export worker panicked: {0}")]
    WorkerPanicked(String),

    /// Single-file export was given an unusable crop or target size.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Single-file export failed.
    #[error(transparent)]
    File(#[from] FileError),
}

/// Render a panic payload caught from a worker.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
