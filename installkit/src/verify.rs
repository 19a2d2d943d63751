//! Digest verification of downloaded artifacts.
//!
//! Verification distinguishes "could not check" (an I/O error while hashing)
//! from "checked and failed" (a clean mismatch), so callers can report the
//! two conditions differently.

use std::path::Path;

use crate::error::{InstallerError, InstallerResult};
use crate::hasher::{hash_file, HashAlgorithm};

/// Check whether a file matches an expected digest.
///
/// The comparison is case-insensitive over the hex representation.
///
/// # Returns
///
/// `Ok(true)` on a match, `Ok(false)` on a mismatch, or `ReadFailed` if the
/// file could not be hashed.
pub fn verify_file(
    path: &Path,
    expected: &str,
    algorithm: HashAlgorithm,
) -> InstallerResult<bool> {
    let actual = hash_file(path, algorithm)?;
    Ok(actual.eq_ignore_ascii_case(expected))
}

/// Verify a file against an expected digest, failing with a diagnostic error.
///
/// Like [`verify_file`], but a mismatch is returned as `ChecksumMismatch`
/// carrying both digests for logging.
pub fn ensure_digest(
    path: &Path,
    expected: &str,
    algorithm: HashAlgorithm,
) -> InstallerResult<()> {
    let actual = hash_file(path, algorithm)?;
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(InstallerError::ChecksumMismatch {
            filename: path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}
