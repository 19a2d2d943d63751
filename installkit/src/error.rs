//! Error types for the installer pipeline.

use std::io;
use std::path::PathBuf;

/// Result type for installer operations.
pub type InstallerResult<T> = Result<T, InstallerError>;

/// Errors that can occur during an installation.
#[derive(Debug)]
pub enum InstallerError {
    /// The remote manifest is unreachable or does not exist.
    ManifestNotFound { url: String },

    /// The manifest document was fetched but could not be parsed.
    ManifestParseFailed { url: String, reason: String },

    /// Transport failure while fetching the manifest body.
    ManifestFetchFailed { url: String, reason: String },

    /// Failed to download the package archive.
    DownloadFailed { url: String, reason: String },

    /// Network timeout.
    Timeout { url: String, timeout_secs: u64 },

    /// The operation was cancelled by the caller.
    Cancelled,

    /// Checksum verification failed.
    ChecksumMismatch {
        filename: String,
        expected: String,
        actual: String,
    },

    /// The archive is unreadable or truncated.
    CorruptArchive { path: PathBuf, reason: String },

    /// Failed to read a file or directory.
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write a file.
    WriteFailed { path: PathBuf, source: io::Error },

    /// Failed to create a directory.
    CreateDirFailed { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for InstallerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ManifestNotFound { url } => {
                write!(f, "manifest not found at {}", url)
            }
            Self::ManifestParseFailed { url, reason } => {
                write!(f, "failed to parse manifest from {}: {}", url, reason)
            }
            Self::ManifestFetchFailed { url, reason } => {
                write!(f, "failed to fetch manifest from {}: {}", url, reason)
            }
            Self::DownloadFailed { url, reason } => {
                write!(f, "failed to download {}: {}", url, reason)
            }
            Self::Timeout { url, timeout_secs } => {
                write!(f, "request to {} timed out after {}s", url, timeout_secs)
            }
            Self::Cancelled => write!(f, "operation cancelled"),
            Self::ChecksumMismatch {
                filename,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "checksum mismatch for {}: expected {}, got {}",
                    filename, expected, actual
                )
            }
            Self::CorruptArchive { path, reason } => {
                write!(f, "corrupt archive {}: {}", path.display(), reason)
            }
            Self::ReadFailed { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            Self::WriteFailed { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            Self::CreateDirFailed { path, source } => {
                write!(
                    f,
                    "failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for InstallerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFailed { source, .. } => Some(source),
            Self::WriteFailed { source, .. } => Some(source),
            Self::CreateDirFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_not_found_display() {
        let err = InstallerError::ManifestNotFound {
            url: "https://example.com/CurrentVersion.xml".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "manifest not found at https://example.com/CurrentVersion.xml"
        );
    }

    #[test]
    fn test_checksum_mismatch_display() {
        let err = InstallerError::ChecksumMismatch {
            filename: "release.zip".to_string(),
            expected: "abc123".to_string(),
            actual: "def456".to_string(),
        };
        assert!(err.to_string().contains("checksum mismatch"));
        assert!(err.to_string().contains("abc123"));
        assert!(err.to_string().contains("def456"));
    }

    #[test]
    fn test_io_error_source() {
        let err = InstallerError::ReadFailed {
            path: PathBuf::from("/tmp/missing"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_cancelled_has_no_source() {
        assert!(std::error::Error::source(&InstallerError::Cancelled).is_none());
    }
}
