//! ZIP archive extraction into an install target.

use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::Path;

use super::filter::EntryKind;
use super::target::InstallTarget;
use crate::error::{InstallerError, InstallerResult};
use crate::traits::ArchiveExtractor;

/// Default chunk size for streaming entry contents to disk (4KB).
///
/// Entries are unpacked in buffered chunks rather than materialized whole,
/// keeping memory use flat for arbitrarily large entries.
const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Subfolder native libraries are installed into.
const LIB_FOLDER: &str = "lib";

/// ZIP extractor with platform-aware entry filtering.
///
/// Entries are enumerated from the archive's central directory, classified
/// once into an [`EntryKind`], and written under the target's product root.
/// Implementation-detail files are marked hidden where the platform supports
/// it.
#[derive(Debug)]
pub struct ZipExtractor {
    product: String,
    chunk_size: usize,
}

impl ZipExtractor {
    /// Create an extractor for the given product name.
    pub fn new(product: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the streaming chunk size.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    fn extract_archive(
        &self,
        archive_path: &Path,
        target: &InstallTarget,
    ) -> InstallerResult<usize> {
        let file = File::open(archive_path).map_err(|e| InstallerError::ReadFailed {
            path: archive_path.to_path_buf(),
            source: e,
        })?;

        let mut archive = zip::ZipArchive::new(BufReader::new(file)).map_err(|e| {
            InstallerError::CorruptArchive {
                path: archive_path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        let product_root = target.product_root(&self.product);
        let mut files_written = 0usize;

        for index in 0..archive.len() {
            let mut entry =
                archive
                    .by_index(index)
                    .map_err(|e| InstallerError::CorruptArchive {
                        path: archive_path.to_path_buf(),
                        reason: e.to_string(),
                    })?;

            let name = entry.name().to_string();

            if name.split(['/', '\\']).any(|part| part == "..") {
                return Err(InstallerError::CorruptArchive {
                    path: archive_path.to_path_buf(),
                    reason: format!("path traversal in entry {}", name),
                });
            }

            // Directory entries only materialize directories
            if entry.is_dir() {
                let dir = product_root.join(&name);
                fs::create_dir_all(&dir).map_err(|e| InstallerError::CreateDirFailed {
                    path: dir,
                    source: e,
                })?;
                continue;
            }

            let kind = EntryKind::classify(&name);
            if kind.excluded_on(target.platform) {
                tracing::debug!(entry = %name, platform = target.platform.name(), "skipping excluded entry");
                continue;
            }

            let dest = if kind.is_native_library() {
                product_root.join(LIB_FOLDER).join(&name)
            } else {
                product_root.join(&name)
            };

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| InstallerError::CreateDirFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }

            self.write_entry(&mut entry, &dest, archive_path)?;
            files_written += 1;

            if kind.is_hidden_artifact() {
                // Best effort; an unsupported attribute never fails the install
                if let Err(e) = hide_file(&dest) {
                    tracing::debug!(path = %dest.display(), error = %e, "could not hide file");
                }
            }
        }

        tracing::info!(
            archive = %archive_path.display(),
            files = files_written,
            dest = %product_root.display(),
            "extraction complete"
        );

        Ok(files_written)
    }

    /// Stream one entry to disk in bounded chunks.
    fn write_entry(
        &self,
        entry: &mut impl Read,
        dest: &Path,
        archive_path: &Path,
    ) -> InstallerResult<()> {
        let mut output = File::create(dest).map_err(|e| InstallerError::WriteFailed {
            path: dest.to_path_buf(),
            source: e,
        })?;

        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            let bytes_read = entry
                .read(&mut buffer)
                .map_err(|e| InstallerError::CorruptArchive {
                    path: archive_path.to_path_buf(),
                    reason: format!("entry read error: {}", e),
                })?;

            if bytes_read == 0 {
                break;
            }

            output
                .write_all(&buffer[..bytes_read])
                .map_err(|e| InstallerError::WriteFailed {
                    path: dest.to_path_buf(),
                    source: e,
                })?;
        }

        Ok(())
    }
}

impl ArchiveExtractor for ZipExtractor {
    fn extract(&self, archive: &Path, target: &InstallTarget) -> InstallerResult<usize> {
        self.extract_archive(archive, target)
    }
}

/// Mark a file hidden on platforms with a hidden attribute.
#[cfg(windows)]
fn hide_file(path: &Path) -> std::io::Result<()> {
    use std::process::Command;

    let status = Command::new("attrib").arg("+h").arg(path).status()?;
    if !status.success() {
        return Err(std::io::Error::other(format!(
            "attrib exited with {}",
            status
        )));
    }
    Ok(())
}

/// Mark a file hidden on platforms with a hidden attribute.
///
/// Unix filesystems have no hidden attribute, so this is a no-op.
#[cfg(not(windows))]
fn hide_file(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
