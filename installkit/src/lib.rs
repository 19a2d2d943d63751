//! installkit - download, verify and install versioned release packages.
//!
//! This library implements the full install pipeline for a desktop product:
//! fetch the remote release manifest, stream the archive to a temporary
//! file, verify its digest, and unpack it into the install directory with
//! platform-aware filtering, all orchestrated by a cancellable,
//! progress-reporting [`session::InstallSession`].
//!
//! # Architecture
//!
//! ```text
//! manifest ──► download ──► verify ──► extract
//!     │            │           │          │
//!     └────────────┴───── session ────────┘
//!                   (one worker thread,
//!                    exactly one outcome)
//! ```
//!
//! The session is the only component external callers drive; the stage
//! implementations sit behind the traits in [`traits`] so they can be
//! replaced in tests.

pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod hasher;
pub mod manifest;
pub mod session;
pub mod traits;
pub mod verify;

pub use config::InstallerConfig;
pub use download::{format_bytes, format_transfer, CancelToken, DownloadHandle, DownloadStatus};
pub use error::{InstallerError, InstallerResult};
pub use extract::{default_install_root, Bitness, InstallTarget, Platform, ZipExtractor};
pub use hasher::HashAlgorithm;
pub use manifest::{HttpManifestClient, Manifest};
pub use session::{InstallOutcome, InstallReport, InstallSession, SessionState};
