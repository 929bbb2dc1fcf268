//! Batch exporter state machine.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::cancel::CancelToken;
use super::error::{panic_message, ExportError, FileError};
use super::pipeline::process_entry;
use super::types::{ExportOutcome, ExportProgress, ExportRequest, ExportSummary, ProgressSink};
use crate::naming::ImageEntry;

/// Name of the worker thread started by [`BatchExporter::spawn`].
const WORKER_NAME: &str = "pixelcut-export";

/// What the exporter is doing between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Runs one batch at a time.
///
/// Clones share the same Idle/Running flag, so a clone handed to another
/// thread still refuses to start a second concurrent run.
#[derive(Debug, Clone, Default)]
pub struct BatchExporter {
    running: Arc<AtomicBool>,
}

/// Holds the Running state; dropping it returns the exporter to Idle.
struct RunGuard {
    running: Arc<AtomicBool>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

impl BatchExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        if self.running.load(Ordering::SeqCst) {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    fn begin(&self) -> Result<RunGuard, ExportError> {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ExportError::AlreadyRunning)?;
        Ok(RunGuard {
            running: Arc::clone(&self.running),
        })
    }

    /// Run a batch on the calling thread.
    ///
    /// # Arguments
    ///
    /// * `request` - Crop, shape, target size and options for every file
    /// * `entries` - Input files, processed in order
    /// * `cancel` - Checked before each file
    /// * `progress` - Receives one event per attempted file
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::AlreadyRunning`] if another run holds this
    /// exporter. Validation failures and per-file failures are reported in
    /// the returned summary.
    pub fn export(
        &self,
        request: &ExportRequest,
        entries: &[ImageEntry],
        cancel: &CancelToken,
        progress: &impl ProgressSink,
    ) -> Result<ExportSummary, ExportError> {
        let _guard = self.begin()?;
        Ok(run(request, entries, cancel, progress))
    }

    /// Run a batch on a worker thread.
    ///
    /// The returned handle carries a fresh cancel token and the progress
    /// receiver. The exporter stays Running until the worker finishes.
    pub fn spawn(
        &self,
        request: ExportRequest,
        entries: Vec<ImageEntry>,
    ) -> Result<ExportHandle, ExportError> {
        let guard = self.begin()?;
        let cancel = CancelToken::new();
        let (tx, rx) = mpsc::channel();

        let worker_cancel = cancel.clone();
        let worker = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || {
                let _guard = guard;
                run(&request, &entries, &worker_cancel, &tx)
            })?;

        Ok(ExportHandle {
            cancel,
            progress: rx,
            worker,
        })
    }
}

/// A batch running on a worker thread.
#[derive(Debug)]
pub struct ExportHandle {
    cancel: CancelToken,
    progress: Receiver<ExportProgress>,
    worker: JoinHandle<ExportSummary>,
}

impl ExportHandle {
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Ask the worker to stop before its next file.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Progress events in file order. Iteration ends when the worker is done.
    pub fn progress(&self) -> &Receiver<ExportProgress> {
        &self.progress
    }

    /// Wait for the worker and return its summary.
    pub fn join(self) -> Result<ExportSummary, ExportError> {
        self.worker
            .join()
            .map_err(|payload| ExportError::WorkerPanicked(panic_message(payload.as_ref())))
    }
}

fn run(
    request: &ExportRequest,
    entries: &[ImageEntry],
    cancel: &CancelToken,
    progress: &impl ProgressSink,
) -> ExportSummary {
    if let Err(reason) = request.validate(entries) {
        tracing::warn!(%reason, files = entries.len(), "export rejected");
        return ExportSummary::rejected(reason, entries);
    }

    let total = entries.len();
    tracing::info!(
        total,
        crop = %request.crop,
        target = %request.target,
        output = %request.output_dir.display(),
        "export started"
    );

    let mut summary = ExportSummary::new();
    for (index, entry) in entries.iter().enumerate() {
        if cancel.is_cancelled() {
            summary.outcome = ExportOutcome::Cancelled;
            tracing::info!(attempted = summary.attempted(), total, "export cancelled");
            break;
        }

        progress.emit(ExportProgress {
            current_index: index + 1,
            total,
            file_name: entry.name.clone(),
        });

        let result = panic::catch_unwind(AssertUnwindSafe(|| process_entry(request, entry)))
            .unwrap_or_else(|payload| Err(FileError::Panicked(panic_message(payload.as_ref()))));

        match result {
            Ok(path) => {
                tracing::debug!(file = %entry.name, output = %path.display(), "exported");
                summary.record_success();
            }
            Err(err) => {
                tracing::warn!(file = %entry.name, error = %err, "skipped");
                summary.record_failure(&entry.name, &err);
            }
        }
    }

    tracing::info!(
        exported = summary.exported,
        skipped = summary.skipped,
        "export finished"
    );
    summary
}
