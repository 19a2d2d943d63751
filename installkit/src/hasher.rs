//! Digest calculation for file integrity checks.
//!
//! Hashing always streams the file through a fixed-size buffer so archives of
//! arbitrary size never need to be resident in memory.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha512};

use crate::error::{InstallerError, InstallerResult};

/// Buffer size for reading files during digest calculation (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Digest algorithms supported by the manifest format.
///
/// Manifests published today carry MD5 digests; the SHA variants are kept so
/// the pipeline stays parameterized should the manifest format move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha512,
}

impl HashAlgorithm {
    /// Get a human-readable name for the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha512 => "SHA-512",
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Calculate the digest of a file with the given algorithm.
///
/// # Returns
///
/// The lowercase hexadecimal digest of the file contents.
///
/// # Errors
///
/// Returns `ReadFailed` if the file cannot be opened or read.
pub fn hash_file(path: &Path, algorithm: HashAlgorithm) -> InstallerResult<String> {
    let mut file = File::open(path).map_err(|e| InstallerError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    match algorithm {
        HashAlgorithm::Md5 => hash_stream::<Md5>(&mut file, path),
        HashAlgorithm::Sha1 => hash_stream::<Sha1>(&mut file, path),
        HashAlgorithm::Sha512 => hash_stream::<Sha512>(&mut file, path),
    }
}

/// Stream a file through a digest implementation.
fn hash_stream<D: Digest>(file: &mut File, path: &Path) -> InstallerResult<String> {
    let mut hasher = D::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| InstallerError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    let digest = hasher.finalize();
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}
