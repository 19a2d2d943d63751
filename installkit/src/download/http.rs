//! HTTP-based archive downloader.
//!
//! Streams a remote file to local storage in bounded chunks, reporting
//! progress on every chunk boundary and honouring cooperative cancellation.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;

use super::progress::CancelToken;
use crate::error::{InstallerError, InstallerResult};
use crate::traits::{PackageDownloader, ProgressCallback};

/// Default timeout for HTTP requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 300; // 5 minutes

/// Buffer size for reading/writing during downloads (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// HTTP-based package downloader.
///
/// Implements the `PackageDownloader` trait. Transport errors are returned
/// as-is; retry policy belongs to the caller.
#[derive(Debug)]
pub struct HttpDownloader {
    client: Client,
    timeout: Duration,
}

impl Default for HttpDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpDownloader {
    /// Create a new HTTP downloader with default settings.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new HTTP downloader with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, timeout }
    }

    /// The configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Stream the response body to the destination file.
    fn stream_to_file(
        &self,
        url: &str,
        dest: &Path,
        cancel: &CancelToken,
        progress: Option<&ProgressCallback>,
    ) -> InstallerResult<u64> {
        let mut response = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                InstallerError::Timeout {
                    url: url.to_string(),
                    timeout_secs: self.timeout.as_secs(),
                }
            } else {
                InstallerError::DownloadFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        if !response.status().is_success() {
            return Err(InstallerError::DownloadFailed {
                url: url.to_string(),
                reason: format!("GET request failed with status {}", response.status()),
            });
        }

        let total_size = response.content_length().unwrap_or(0);

        let file = File::create(dest).map_err(|e| InstallerError::WriteFailed {
            path: dest.to_path_buf(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);
        let mut buffer = vec![0u8; BUFFER_SIZE];
        let mut downloaded = 0u64;

        loop {
            if cancel.is_cancelled() {
                drop(writer);
                // The partial file must not outlive a cancelled transfer.
                fs::remove_file(dest).ok();
                return Err(InstallerError::Cancelled);
            }

            let bytes_read = response.read(&mut buffer).map_err(|e| {
                InstallerError::DownloadFailed {
                    url: url.to_string(),
                    reason: format!("read error: {}", e),
                }
            })?;

            if bytes_read == 0 {
                break;
            }

            writer
                .write_all(&buffer[..bytes_read])
                .map_err(|e| InstallerError::WriteFailed {
                    path: dest.to_path_buf(),
                    source: e,
                })?;

            downloaded += bytes_read as u64;

            if let Some(cb) = progress {
                cb(downloaded, total_size);
            }
        }

        writer.flush().map_err(|e| InstallerError::WriteFailed {
            path: dest.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(url, bytes = downloaded, "download finished");

        Ok(downloaded)
    }
}

impl PackageDownloader for HttpDownloader {
    fn download(
        &self,
        url: &str,
        dest: &Path,
        cancel: &CancelToken,
        progress: Option<ProgressCallback>,
    ) -> InstallerResult<u64> {
        self.stream_to_file(url, dest, cancel, progress.as_ref())
    }
}
