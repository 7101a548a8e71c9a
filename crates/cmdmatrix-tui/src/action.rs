use std::path::PathBuf;

use cmdmatrix::Snapshot;

/// Commands returned by the app to the event loop for side-effect execution.
#[derive(Debug, PartialEq)]
pub enum AppCommand {
    /// No side effect needed.
    None,
    /// Quit the application.
    Quit,
    /// Put `text` on the clipboard; `record_id` feeds the usage counter.
    Copy { record_id: String, text: String },
    /// Collect a fresh snapshot in the background.
    FetchSnapshot,
    /// Write a report of the given snapshot.
    Export(Box<Snapshot>),
}

/// Actions dispatched back into the app from background tasks.
#[derive(Debug)]
pub enum Action {
    /// A snapshot was collected (or collection failed).
    SnapshotLoaded(Box<Result<Snapshot, String>>),
    /// Clipboard write completed.
    CopyCompleted {
        record_id: String,
        text: String,
        result: Result<(), String>,
    },
    /// Report export completed with the written path.
    ExportCompleted(Result<PathBuf, String>),
}
