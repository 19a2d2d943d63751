//! Entry classification for platform-aware extraction.
//!
//! Each archive entry is classified once into a closed set of file-type
//! categories; all filtering, placement and hiding decisions key off the
//! category rather than re-deriving it from the file name.

use super::target::Platform;

/// File-type category of an archive entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Debug symbol files, never installed.
    DebugSymbols,
    /// Windows dynamic library.
    WindowsLibrary,
    /// macOS dynamic library.
    MacLibrary,
    /// Linux shared object.
    LinuxLibrary,
    /// Runtime configuration files.
    RuntimeConfig,
    /// Serialized metadata files.
    Metadata,
    /// Anything else: executables, assets, data.
    Other,
}

impl EntryKind {
    /// Classify an entry by its file name.
    pub fn classify(name: &str) -> Self {
        let lower = name.to_lowercase();

        if lower.ends_with(".pdb") {
            Self::DebugSymbols
        } else if lower.ends_with(".dll") {
            Self::WindowsLibrary
        } else if lower.ends_with(".dylib") {
            Self::MacLibrary
        } else if lower.ends_with(".so") {
            Self::LinuxLibrary
        } else if lower.ends_with(".config") || lower.ends_with(".json") {
            Self::RuntimeConfig
        } else if lower.ends_with(".xml") || lower.ends_with(".dat") {
            Self::Metadata
        } else {
            Self::Other
        }
    }

    /// Whether this kind of entry is excluded from installs on `platform`.
    ///
    /// Debug symbols are excluded everywhere; otherwise an entry is excluded
    /// when its library type is foreign to the target platform.
    pub fn excluded_on(&self, platform: Platform) -> bool {
        match self {
            Self::DebugSymbols => true,
            Self::WindowsLibrary => platform != Platform::Windows,
            Self::MacLibrary => matches!(platform, Platform::Windows | Platform::Linux),
            Self::LinuxLibrary => platform == Platform::Windows,
            _ => false,
        }
    }

    /// Whether this entry is a native library, installed under `lib/`.
    pub fn is_native_library(&self) -> bool {
        matches!(
            self,
            Self::WindowsLibrary | Self::MacLibrary | Self::LinuxLibrary
        )
    }

    /// Whether this entry is an implementation detail that should be hidden
    /// from the user where the platform supports a hidden attribute.
    pub fn is_hidden_artifact(&self) -> bool {
        self.is_native_library() || matches!(self, Self::RuntimeConfig | Self::Metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(EntryKind::classify("Nova.pdb"), EntryKind::DebugSymbols);
        assert_eq!(EntryKind::classify("engine.dll"), EntryKind::WindowsLibrary);
        assert_eq!(EntryKind::classify("libengine.dylib"), EntryKind::MacLibrary);
        assert_eq!(EntryKind::classify("libengine.so"), EntryKind::LinuxLibrary);
        assert_eq!(EntryKind::classify("app.config"), EntryKind::RuntimeConfig);
        assert_eq!(EntryKind::classify("settings.json"), EntryKind::RuntimeConfig);
        assert_eq!(EntryKind::classify("meta.xml"), EntryKind::Metadata);
        assert_eq!(EntryKind::classify("scores.dat"), EntryKind::Metadata);
        assert_eq!(EntryKind::classify("Nova.exe"), EntryKind::Other);
        assert_eq!(EntryKind::classify("assets/logo.png"), EntryKind::Other);
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(EntryKind::classify("ENGINE.DLL"), EntryKind::WindowsLibrary);
        assert_eq!(EntryKind::classify("Nova.PDB"), EntryKind::DebugSymbols);
    }

    #[test]
    fn test_debug_symbols_excluded_everywhere() {
        for platform in [Platform::Windows, Platform::MacOs, Platform::Linux] {
            assert!(EntryKind::DebugSymbols.excluded_on(platform));
        }
    }

    #[test]
    fn test_windows_excludes_foreign_libraries() {
        assert!(!EntryKind::WindowsLibrary.excluded_on(Platform::Windows));
        assert!(EntryKind::MacLibrary.excluded_on(Platform::Windows));
        assert!(EntryKind::LinuxLibrary.excluded_on(Platform::Windows));
    }

    #[test]
    fn test_macos_excludes_windows_libraries() {
        assert!(EntryKind::WindowsLibrary.excluded_on(Platform::MacOs));
        assert!(!EntryKind::MacLibrary.excluded_on(Platform::MacOs));
        assert!(!EntryKind::LinuxLibrary.excluded_on(Platform::MacOs));
    }

    #[test]
    fn test_linux_excludes_windows_and_mac_libraries() {
        assert!(EntryKind::WindowsLibrary.excluded_on(Platform::Linux));
        assert!(EntryKind::MacLibrary.excluded_on(Platform::Linux));
        assert!(!EntryKind::LinuxLibrary.excluded_on(Platform::Linux));
    }

    #[test]
    fn test_ordinary_entries_never_excluded() {
        for platform in [Platform::Windows, Platform::MacOs, Platform::Linux] {
            assert!(!EntryKind::Other.excluded_on(platform));
            assert!(!EntryKind::RuntimeConfig.excluded_on(platform));
            assert!(!EntryKind::Metadata.excluded_on(platform));
        }
    }

    #[test]
    fn test_hidden_artifact_set() {
        assert!(EntryKind::WindowsLibrary.is_hidden_artifact());
        assert!(EntryKind::RuntimeConfig.is_hidden_artifact());
        assert!(EntryKind::Metadata.is_hidden_artifact());
        assert!(!EntryKind::Other.is_hidden_artifact());
        assert!(!EntryKind::DebugSymbols.is_hidden_artifact());
    }
}
