//! Archive extraction into the install target.
//!
//! This module handles the final unpack step of an installation:
//! - Platform-aware entry filtering (`filter`)
//! - Destination layout and default install locations (`target`)
//! - Streaming ZIP extraction with hidden-file marking (`archive`)
//!
//! Nothing here runs before the downloaded artifact has been verified; the
//! session guarantees that ordering.

mod archive;
mod filter;
mod target;

pub use archive::ZipExtractor;
pub use filter::EntryKind;
pub use target::{default_install_root, Bitness, InstallTarget, Platform};
