//! HTTP download of package archives.
//!
//! This module provides:
//! - Streaming downloads with progress callbacks (`http`)
//! - Cooperative cancellation via an atomic token (`progress`)
//! - Human-readable byte formatting for UI display (`progress`)
//! - Per-download state tracking (`handle`)
//!
//! The downloader itself never retries; retry policy belongs to the session.

mod handle;
mod http;
mod progress;

pub use handle::{DownloadHandle, DownloadStatus};
pub use http::HttpDownloader;
pub use progress::{format_bytes, format_transfer, CancelToken};
