//! Request, progress and summary types for batch export.

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use crate::decode::FilterType;
use crate::mask::ShapeConfig;
use crate::naming::{FilenameMode, ImageEntry, OutputFormat};
use crate::transform::CropRect;
use crate::{TargetSize, MAX_TARGET_PIXELS};

/// Default JPEG quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Background used when flattening masked or translucent pixels.
pub const DEFAULT_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Encoding and naming options shared by every file of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    /// Keep masked-out pixels transparent in PNG output.
    pub transparent_png: bool,
    pub filename_mode: FilenameMode,
    pub output_format: OutputFormat,
    /// Opaque RGB background for flattened output.
    pub background: [u8; 3],
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
    /// Resampling filter used for every file.
    pub filter: FilterType,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            transparent_png: false,
            filename_mode: FilenameMode::default(),
            output_format: OutputFormat::default(),
            background: DEFAULT_BACKGROUND,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            filter: FilterType::default(),
        }
    }
}

/// Everything one run needs. Nothing here changes while the run executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub crop: CropRect,
    #[serde(default)]
    pub shape: ShapeConfig,
    pub target: TargetSize,
    #[serde(default)]
    pub options: ExportOptions,
}

impl ExportRequest {
    /// Check the request against the entries it will run over.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: empty crop, then a non-positive or
    /// oversized target, then an empty input list.
    pub fn validate(&self, entries: &[ImageEntry]) -> Result<(), ValidationError> {
        if self.crop.is_empty() {
            return Err(ValidationError::EmptyCrop { crop: self.crop });
        }
        validate_target(self.target)?;
        if entries.is_empty() {
            return Err(ValidationError::NoInputs);
        }
        Ok(())
    }
}

/// Reject zero-sized targets and targets above [`MAX_TARGET_PIXELS`].
pub(crate) fn validate_target(target: TargetSize) -> Result<(), ValidationError> {
    if !target.is_valid() {
        return Err(ValidationError::InvalidTargetSize { target });
    }
    if !target.within_budget() {
        return Err(ValidationError::TargetTooLarge {
            target,
            max: MAX_TARGET_PIXELS,
        });
    }
    Ok(())
}

/// Emitted once per file, before that file is processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportProgress {
    /// 1-based position of the file in the run.
    pub current_index: usize,
    pub total: usize,
    pub file_name: String,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportOutcome {
    /// Every entry was attempted.
    Completed,
    /// Cancellation was observed before the last entry.
    Cancelled,
    /// Validation failed; no file was read.
    Rejected(ValidationError),
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub exported: usize,
    pub skipped: usize,
    /// One `"<file name>: <message>"` line per skipped file, in run order.
    pub errors: Vec<String>,
    pub outcome: ExportOutcome,
}

impl ExportSummary {
    pub(crate) fn new() -> Self {
        Self {
            exported: 0,
            skipped: 0,
            errors: Vec::new(),
            outcome: ExportOutcome::Completed,
        }
    }

    /// Summary of a run that failed validation: every entry is skipped with
    /// the validation message.
    pub fn rejected(reason: ValidationError, entries: &[ImageEntry]) -> Self {
        let errors = entries
            .iter()
            .map(|entry| format!("{}: {}", entry.name, reason))
            .collect::<Vec<_>>();
        Self {
            exported: 0,
            skipped: errors.len(),
            errors,
            outcome: ExportOutcome::Rejected(reason),
        }
    }

    /// Files the run got to, successful or not.
    pub fn attempted(&self) -> usize {
        self.exported + self.skipped
    }

    pub fn is_cancelled(&self) -> bool {
        self.outcome == ExportOutcome::Cancelled
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, ExportOutcome::Rejected(_))
    }

    pub(crate) fn record_success(&mut self) {
        self.exported += 1;
    }

    pub(crate) fn record_failure(&mut self, name: &str, message: impl std::fmt::Display) {
        self.skipped += 1;
        self.errors.push(format!("{name}: {message}"));
    }
}

/// Receiver side of the progress stream.
///
/// Emitting must never fail the run; a sink whose consumer has gone away
/// silently drops events.
pub trait ProgressSink {
    fn emit(&self, progress: ExportProgress);
}

impl ProgressSink for Sender<ExportProgress> {
    fn emit(&self, progress: ExportProgress) {
        if self.send(progress).is_err() {
            tracing::debug!("progress receiver dropped");
        }
    }
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn emit(&self, _progress: ExportProgress) {}
}
