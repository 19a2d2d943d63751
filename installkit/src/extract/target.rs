//! Install destination: root directory plus platform context.

use std::path::{Path, PathBuf};

/// Target operating system for an installation.
///
/// Decides which archive entries are applicable and how files are hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// The platform this process is running on.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    /// Get a human-readable name for the platform.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
        }
    }
}

/// Process bitness of the target installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitness {
    X86,
    X64,
}

impl Bitness {
    /// The bitness this process is running with.
    pub fn current() -> Self {
        if cfg!(target_pointer_width = "64") {
            Self::X64
        } else {
            Self::X86
        }
    }

    /// Get a human-readable name for the bitness.
    pub fn name(&self) -> &'static str {
        match self {
            Self::X86 => "32-bit",
            Self::X64 => "64-bit",
        }
    }
}

/// Destination for an installation.
///
/// Supplied by the caller and used verbatim; the pipeline does not own the
/// directory's lifetime.
#[derive(Debug, Clone)]
pub struct InstallTarget {
    /// Root directory files are installed under.
    pub root: PathBuf,
    /// Platform the installation is for.
    pub platform: Platform,
    /// Bitness the installation is for.
    pub bitness: Bitness,
}

impl InstallTarget {
    /// Create a target for the current platform and bitness.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            platform: Platform::current(),
            bitness: Bitness::current(),
        }
    }

    /// Override the platform.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Override the bitness.
    pub fn with_bitness(mut self, bitness: Bitness) -> Self {
        self.bitness = bitness;
        self
    }

    /// The directory the product is installed into.
    ///
    /// When the root's final component does not already name the product,
    /// a product subfolder is appended, so installs into an arbitrary parent
    /// directory (a desktop, say) still land inside a dedicated folder.
    /// Applying this twice to the same root yields the same directory.
    pub fn product_root(&self, product: &str) -> PathBuf {
        let root_names_product = self
            .root
            .file_name()
            .map(|name| {
                name.to_string_lossy()
                    .to_lowercase()
                    .contains(&product.to_lowercase())
            })
            .unwrap_or(false);

        if root_names_product {
            self.root.clone()
        } else {
            self.root.join(product)
        }
    }
}

/// Default per-user install root for a product.
///
/// Derived from the platform's per-user application-data directory; this is
/// advisory only, and whatever directory the caller passes in is used
/// verbatim.
pub fn default_install_root(product: &str) -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(product)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_root_appends_when_missing() {
        let target = InstallTarget::new("/home/user/Desktop");
        assert_eq!(
            target.product_root("Nova"),
            PathBuf::from("/home/user/Desktop/Nova")
        );
    }

    #[test]
    fn test_product_root_keeps_named_directory() {
        let target = InstallTarget::new("/home/user/Nova");
        assert_eq!(target.product_root("Nova"), PathBuf::from("/home/user/Nova"));
    }

    #[test]
    fn test_product_root_match_is_case_insensitive() {
        let target = InstallTarget::new("/opt/nova-stable");
        assert_eq!(
            target.product_root("Nova"),
            PathBuf::from("/opt/nova-stable")
        );
    }

    #[test]
    fn test_product_root_is_idempotent() {
        let target = InstallTarget::new("/home/user/Desktop");
        let first = target.product_root("Nova");

        // A second install into the same root resolves to the same directory
        let again = InstallTarget::new("/home/user/Desktop").product_root("Nova");
        assert_eq!(first, again);

        // And a target already at the product directory does not nest deeper
        let nested = InstallTarget::new(&first).product_root("Nova");
        assert_eq!(nested, first);
    }

    #[test]
    fn test_default_install_root_ends_with_product() {
        let root = default_install_root("Nova");
        assert!(root.ends_with("Nova"));
    }

    #[test]
    fn test_platform_current_is_stable() {
        assert_eq!(Platform::current(), Platform::current());
    }
}
