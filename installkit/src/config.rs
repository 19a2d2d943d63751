//! Configuration for the installer pipeline.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of attempts for the transient copy step.
pub const DEFAULT_COPY_ATTEMPTS: usize = 5;

/// Default pause between copy attempts.
pub const DEFAULT_COPY_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Default chunk size for streaming extraction (4KB).
pub const DEFAULT_EXTRACT_CHUNK_SIZE: usize = 4096;

/// Configuration for an install session.
#[derive(Debug, Clone)]
pub struct InstallerConfig {
    /// URL of the release manifest document.
    pub manifest_url: String,

    /// Application identifier the manifest is keyed by.
    pub app_id: String,

    /// Product name, used for the dedicated install subfolder.
    pub product: String,

    /// Directory for the session's temporary files.
    pub temp_dir: PathBuf,

    /// HTTP request timeout.
    pub timeout: Duration,

    /// Attempts for the temp-to-working-file copy before giving up.
    pub copy_attempts: usize,

    /// Fixed pause between copy attempts.
    pub copy_retry_delay: Duration,

    /// Chunk size for streaming archive entries to disk.
    pub extract_chunk_size: usize,
}

impl InstallerConfig {
    /// Create a configuration with default tuning.
    pub fn new(
        manifest_url: impl Into<String>,
        app_id: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        Self {
            manifest_url: manifest_url.into(),
            app_id: app_id.into(),
            product: product.into(),
            temp_dir: env::temp_dir().join("installkit"),
            timeout: DEFAULT_TIMEOUT,
            copy_attempts: DEFAULT_COPY_ATTEMPTS,
            copy_retry_delay: DEFAULT_COPY_RETRY_DELAY,
            extract_chunk_size: DEFAULT_EXTRACT_CHUNK_SIZE,
        }
    }

    /// Set the temporary file directory.
    pub fn with_temp_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.temp_dir = path.into();
        self
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of attempts for the transient copy step.
    pub fn with_copy_attempts(mut self, attempts: usize) -> Self {
        self.copy_attempts = attempts.max(1);
        self
    }

    /// Set the pause between copy attempts.
    pub fn with_copy_retry_delay(mut self, delay: Duration) -> Self {
        self.copy_retry_delay = delay;
        self
    }

    /// Set the chunk size for streaming extraction.
    pub fn with_extract_chunk_size(mut self, size: usize) -> Self {
        self.extract_chunk_size = size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning() {
        let config = InstallerConfig::new("http://example.com/CurrentVersion.xml", "Nova", "Nova");

        assert_eq!(config.copy_attempts, 5);
        assert_eq!(config.copy_retry_delay, Duration::from_secs(1));
        assert_eq!(config.extract_chunk_size, 4096);
        assert!(config.temp_dir.ends_with("installkit"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = InstallerConfig::new("http://example.com/CurrentVersion.xml", "Nova", "Nova")
            .with_temp_dir("/tmp/staging")
            .with_timeout(Duration::from_secs(60))
            .with_copy_attempts(3)
            .with_copy_retry_delay(Duration::from_millis(100))
            .with_extract_chunk_size(8192);

        assert_eq!(config.temp_dir, PathBuf::from("/tmp/staging"));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.copy_attempts, 3);
        assert_eq!(config.copy_retry_delay, Duration::from_millis(100));
        assert_eq!(config.extract_chunk_size, 8192);
    }

    #[test]
    fn test_copy_attempts_floor() {
        let config = InstallerConfig::new("http://example.com/CurrentVersion.xml", "Nova", "Nova")
            .with_copy_attempts(0);
        assert_eq!(config.copy_attempts, 1);
    }
}
