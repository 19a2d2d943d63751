//! State tracking for an in-flight or completed download.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Lifecycle of a single download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    /// Not yet started.
    Pending,
    /// Bytes are being transferred.
    InProgress,
    /// Transfer finished successfully.
    Completed,
    /// Transfer aborted by cancellation.
    Cancelled,
    /// Transfer failed.
    Failed,
}

impl DownloadStatus {
    /// Get a human-readable name for the status.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }
}

/// Shared record of one download.
///
/// The session creates a handle when the download starts and shares it with
/// callers via `Arc`; byte counters are atomics so the progress path can
/// update them from the worker thread while a UI polls from its own.
/// The temp path is exclusively owned by the session, which removes the file
/// when the session ends regardless of outcome.
#[derive(Debug)]
pub struct DownloadHandle {
    source_url: String,
    temp_path: PathBuf,
    bytes_received: AtomicU64,
    bytes_total: AtomicU64,
    status: Mutex<DownloadStatus>,
}

impl DownloadHandle {
    /// Create a new handle in the `Pending` state.
    pub fn new(source_url: impl Into<String>, temp_path: impl Into<PathBuf>) -> Self {
        Self {
            source_url: source_url.into(),
            temp_path: temp_path.into(),
            bytes_received: AtomicU64::new(0),
            bytes_total: AtomicU64::new(0),
            status: Mutex::new(DownloadStatus::Pending),
        }
    }

    /// The URL the download reads from.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// The temporary file the download writes to.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Bytes received so far.
    pub fn bytes_received(&self) -> u64 {
        self.bytes_received.load(Ordering::SeqCst)
    }

    /// Total expected bytes, or 0 if the server did not report a length.
    pub fn bytes_total(&self) -> u64 {
        self.bytes_total.load(Ordering::SeqCst)
    }

    /// Current status.
    pub fn status(&self) -> DownloadStatus {
        *self.status.lock().expect("download status lock poisoned")
    }

    /// Record a progress update.
    pub fn record_progress(&self, received: u64, total: u64) {
        self.bytes_received.store(received, Ordering::SeqCst);
        self.bytes_total.store(total, Ordering::SeqCst);
    }

    /// Transition to a new status.
    pub fn set_status(&self, status: DownloadStatus) {
        *self.status.lock().expect("download status lock poisoned") = status;
    }

    /// Progress as a percentage, or 0.0 while the total is unknown.
    pub fn progress_percent(&self) -> f64 {
        let total = self.bytes_total();
        if total == 0 {
            0.0
        } else {
            (self.bytes_received() as f64 / total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_handle_is_pending() {
        let handle = DownloadHandle::new("http://example.com/release.zip", "/tmp/dl");
        assert_eq!(handle.status(), DownloadStatus::Pending);
        assert_eq!(handle.bytes_received(), 0);
        assert_eq!(handle.bytes_total(), 0);
    }

    #[test]
    fn test_record_progress() {
        let handle = DownloadHandle::new("http://example.com/release.zip", "/tmp/dl");

        handle.record_progress(500, 1000);

        assert_eq!(handle.bytes_received(), 500);
        assert_eq!(handle.bytes_total(), 1000);
        assert_eq!(handle.progress_percent(), 50.0);
    }

    #[test]
    fn test_progress_percent_with_unknown_total() {
        let handle = DownloadHandle::new("http://example.com/release.zip", "/tmp/dl");
        handle.record_progress(500, 0);
        assert_eq!(handle.progress_percent(), 0.0);
    }

    #[test]
    fn test_status_transitions() {
        let handle = DownloadHandle::new("http://example.com/release.zip", "/tmp/dl");

        handle.set_status(DownloadStatus::InProgress);
        assert_eq!(handle.status(), DownloadStatus::InProgress);

        handle.set_status(DownloadStatus::Completed);
        assert_eq!(handle.status(), DownloadStatus::Completed);
    }

    #[test]
    fn test_status_names() {
        assert_eq!(DownloadStatus::Pending.name(), "pending");
        assert_eq!(DownloadStatus::Cancelled.name(), "cancelled");
    }
}
