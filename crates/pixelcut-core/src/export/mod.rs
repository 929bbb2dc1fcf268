//! Batch export: one crop, one mask, one size, many files.
//!
//! # Architecture
//!
//! [`BatchExporter`] is the only stateful piece and holds nothing but an
//! Idle/Running flag. Everything a run needs arrives in an [`ExportRequest`];
//! progress leaves through a [`ProgressSink`] (usually an mpsc channel) and
//! cancellation arrives through a [`CancelToken`].
//!
//! Files are processed sequentially. The cancel token is checked only at the
//! top of each file's iteration, so the file being processed always finishes
//! (or fails) before the run stops.

mod cancel;
mod error;
mod exporter;
mod pipeline;
mod types;

pub use cancel::CancelToken;
pub use error::{ExportError, FileError, ValidationError};
pub use exporter::{BatchExporter, ExportHandle, RunState};
pub use pipeline::{export_single, process_entry, resize_and_encode};
pub use types::{
    ExportOptions, ExportOutcome, ExportProgress, ExportRequest, ExportSummary, NoProgress,
    ProgressSink,
};
