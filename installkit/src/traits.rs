//! Core trait interfaces for the installer pipeline.
//!
//! The session depends on these seams rather than on concrete
//! implementations, so each stage can be exercised in isolation with mock
//! implementations in tests.

use std::path::Path;

use crate::download::CancelToken;
use crate::error::InstallerResult;
use crate::extract::InstallTarget;
use crate::manifest::Manifest;

/// Progress callback invoked during a download.
///
/// Arguments: (bytes_received, bytes_total). `bytes_total` is 0 when the
/// server did not report a length. Callbacks may fire on a worker thread;
/// callers needing thread affinity marshal onto their own context.
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Client for the remote release manifest.
pub trait ManifestClient: Send {
    /// Check whether the manifest document is reachable.
    fn exists(&self) -> bool;

    /// Fetch and parse the manifest.
    ///
    /// Never returns a partially populated manifest: every field is present
    /// and well-formed, or the fetch fails.
    fn fetch(&self) -> InstallerResult<Manifest>;
}

/// Downloader for package archives.
pub trait PackageDownloader: Send {
    /// Stream a remote file to `dest`.
    ///
    /// Invokes `progress` on every chunk boundary and aborts with
    /// `Cancelled` (removing the partial file) when the token is observed
    /// cancelled. Transport failures are returned without internal retry.
    fn download(
        &self,
        url: &str,
        dest: &Path,
        cancel: &CancelToken,
        progress: Option<ProgressCallback>,
    ) -> InstallerResult<u64>;
}

/// Extractor for downloaded archives.
pub trait ArchiveExtractor: Send {
    /// Unpack `archive` into the install target, applying platform
    /// filtering.
    ///
    /// Returns the number of files written.
    fn extract(&self, archive: &Path, target: &InstallTarget) -> InstallerResult<usize>;
}
