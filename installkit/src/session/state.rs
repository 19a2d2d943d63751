//! Install session states and terminal outcomes.

use std::path::PathBuf;

use crate::error::InstallerError;

/// State of an install session.
///
/// Sessions move strictly forward through
/// `Idle → FetchingManifest → Downloading → Verifying → Extracting →
/// Complete`; `Aborted` and `Failed` are the terminal error states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not started yet.
    Idle,
    /// Retrieving the release manifest.
    FetchingManifest,
    /// Streaming the archive to the temp file.
    Downloading,
    /// Re-hashing the downloaded artifact.
    Verifying,
    /// Unpacking into the install target.
    Extracting,
    /// Finished successfully.
    Complete,
    /// Cancelled by the caller.
    Aborted,
    /// Stopped by an unrecoverable error.
    Failed,
}

impl SessionState {
    /// Get a human-readable name for the state.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FetchingManifest => "fetching manifest",
            Self::Downloading => "downloading",
            Self::Verifying => "verifying",
            Self::Extracting => "extracting",
            Self::Complete => "complete",
            Self::Aborted => "aborted",
            Self::Failed => "failed",
        }
    }

    /// Whether the session will make no further transitions from this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Aborted | Self::Failed)
    }
}

/// Summary of a successful installation.
#[derive(Debug, Clone)]
pub struct InstallReport {
    /// Version that was installed.
    pub version: semver::Version,
    /// Directory the product was installed into.
    pub install_path: PathBuf,
    /// Total bytes downloaded.
    pub bytes_downloaded: u64,
    /// Number of files written by extraction.
    pub files_installed: usize,
}

/// Terminal result of an install session, delivered exactly once.
#[derive(Debug)]
pub enum InstallOutcome {
    /// Installation finished and the payload is in place.
    Complete(InstallReport),
    /// The caller cancelled the installation.
    Aborted,
    /// The installation stopped on an unrecoverable error.
    ///
    /// The inner error keeps the precise kind for logs and diagnostics;
    /// [`InstallOutcome::user_message`] collapses it for end users.
    Failed(InstallerError),
}

impl InstallOutcome {
    /// The terminal state matching this outcome.
    pub fn state(&self) -> SessionState {
        match self {
            Self::Complete(_) => SessionState::Complete,
            Self::Aborted => SessionState::Aborted,
            Self::Failed(_) => SessionState::Failed,
        }
    }

    /// The actionable message shown to end users.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Complete(_) => "Installation is complete.",
            Self::Aborted => "The download was cancelled.",
            Self::Failed(_) => "There was a problem during installation. Please try again.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(SessionState::Complete.is_terminal());
        assert!(SessionState::Aborted.is_terminal());
        assert!(SessionState::Failed.is_terminal());

        assert!(!SessionState::Idle.is_terminal());
        assert!(!SessionState::FetchingManifest.is_terminal());
        assert!(!SessionState::Downloading.is_terminal());
        assert!(!SessionState::Verifying.is_terminal());
        assert!(!SessionState::Extracting.is_terminal());
    }

    #[test]
    fn test_outcome_states() {
        assert_eq!(InstallOutcome::Aborted.state(), SessionState::Aborted);
        assert_eq!(
            InstallOutcome::Failed(InstallerError::Cancelled).state(),
            SessionState::Failed
        );
    }

    #[test]
    fn test_user_messages_collapse_error_kinds() {
        let network = InstallOutcome::Failed(InstallerError::DownloadFailed {
            url: "http://example.com".to_string(),
            reason: "reset".to_string(),
        });
        let mismatch = InstallOutcome::Failed(InstallerError::ChecksumMismatch {
            filename: "release.zip".to_string(),
            expected: "aa".to_string(),
            actual: "bb".to_string(),
        });

        assert_eq!(network.user_message(), mismatch.user_message());
        assert_ne!(network.user_message(), InstallOutcome::Aborted.user_message());
    }

    #[test]
    fn test_state_names() {
        assert_eq!(SessionState::FetchingManifest.name(), "fetching manifest");
        assert_eq!(SessionState::Downloading.name(), "downloading");
        assert_eq!(SessionState::Complete.name(), "complete");
    }
}
