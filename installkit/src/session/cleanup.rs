//! Scoped removal of session-owned temporary files.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Pause before the second (and last) removal attempt.
const REMOVE_RETRY_DELAY: Duration = Duration::from_millis(200);

/// Guard that removes a temporary file when it goes out of scope.
///
/// Removal is attempted twice, then abandoned silently rather than blocking
/// shutdown. The guard is held for the whole pipeline run, so every early
/// return still cleans up before the terminal outcome becomes observable.
#[derive(Debug)]
pub(crate) struct TempFileGuard {
    path: PathBuf,
}

impl TempFileGuard {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }

        if let Err(first) = fs::remove_file(&self.path) {
            tracing::warn!(
                path = %self.path.display(),
                error = %first,
                "failed to remove temporary file, retrying once"
            );
            thread::sleep(REMOVE_RETRY_DELAY);

            if let Err(second) = fs::remove_file(&self.path) {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %second,
                    "giving up on temporary file"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_removes_file_on_drop() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.pkg");
        fs::write(&path, b"partial download").unwrap();

        {
            let guard = TempFileGuard::new(path.clone());
            assert_eq!(guard.path(), path);
        }

        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file_is_fine() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("never-created.pkg");

        drop(TempFileGuard::new(path.clone()));

        assert!(!path.exists());
    }
}
