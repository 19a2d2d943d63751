//! Remote release manifest fetching and parsing.
//!
//! The manifest is a small XML document published next to the release
//! archive. Its root `install` element is keyed by an application identifier
//! and names the current version, the archive download location and the
//! expected digest:
//!
//! ```text
//! <install appId="Nova">
//!     <version>1.2.0</version>
//!     <download>https://releases.example.com/Nova-1.2.0.zip</download>
//!     <md5>5d41402abc4b2a76b9719d911017c592</md5>
//! </install>
//! ```

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{InstallerError, InstallerResult};
use crate::hasher::HashAlgorithm;
use crate::traits::ManifestClient;

/// Default timeout for manifest requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// An installable release, as described by the remote manifest.
///
/// Immutable once parsed; a manifest is never returned partially populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Version of the release.
    pub version: semver::Version,
    /// Where to download the release archive.
    pub download_url: String,
    /// Expected digest of the archive, lowercase hex.
    pub digest: String,
    /// Algorithm the digest was computed with.
    pub algorithm: HashAlgorithm,
}

/// HTTP client for the remote manifest document.
#[derive(Debug)]
pub struct HttpManifestClient {
    client: Client,
    url: String,
    app_id: String,
}

impl HttpManifestClient {
    /// Create a client for the manifest at `url`, keyed by `app_id`.
    pub fn new(url: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self::with_timeout(url, app_id, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom request timeout.
    pub fn with_timeout(
        url: impl Into<String>,
        app_id: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: url.into(),
            app_id: app_id.into(),
        }
    }

    /// The manifest URL this client reads from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ManifestClient for HttpManifestClient {
    /// Check whether the manifest document is reachable.
    ///
    /// Any transport failure or non-success status reads as "not there";
    /// the caller treats both the same way.
    fn exists(&self) -> bool {
        self.client
            .head(&self.url)
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    fn fetch(&self) -> InstallerResult<Manifest> {
        if !self.exists() {
            return Err(InstallerError::ManifestNotFound {
                url: self.url.clone(),
            });
        }

        let response =
            self.client
                .get(&self.url)
                .send()
                .map_err(|e| InstallerError::ManifestFetchFailed {
                    url: self.url.clone(),
                    reason: e.to_string(),
                })?;

        if !response.status().is_success() {
            return Err(InstallerError::ManifestNotFound {
                url: self.url.clone(),
            });
        }

        let body = response
            .text()
            .map_err(|e| InstallerError::ManifestFetchFailed {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        parse_manifest(&body, &self.app_id, &self.url)
    }
}

/// Parse a manifest document.
///
/// The `install` element matching `app_id` must carry non-empty `version`,
/// `download` and `md5` children; anything missing or malformed is a parse
/// failure, never a partially filled manifest.
pub fn parse_manifest(xml: &str, app_id: &str, url: &str) -> InstallerResult<Manifest> {
    let parse_err = |reason: String| InstallerError::ManifestParseFailed {
        url: url.to_string(),
        reason,
    };

    let doc = roxmltree::Document::parse(xml).map_err(|e| parse_err(e.to_string()))?;

    let install = doc
        .descendants()
        .find(|n| n.has_tag_name("install") && n.attribute("appId") == Some(app_id))
        .ok_or_else(|| parse_err(format!("no install element for appId '{}'", app_id)))?;

    let child_text = |name: &str| -> InstallerResult<String> {
        install
            .children()
            .find(|c| c.has_tag_name(name))
            .and_then(|c| c.text())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| parse_err(format!("missing {} field", name)))
    };

    let version = semver::Version::parse(&child_text("version")?)
        .map_err(|e| parse_err(format!("invalid version: {}", e)))?;
    let download_url = child_text("download")?;
    let digest = child_text("md5")?.to_lowercase();

    Ok(Manifest {
        version,
        download_url,
        digest,
        algorithm: HashAlgorithm::Md5,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
        <install appId="Nova">
            <version>1.2.0</version>
            <download>https://releases.example.com/Nova-1.2.0.zip</download>
            <md5>5D41402ABC4B2A76B9719D911017C592</md5>
        </install>
    "#;

    #[test]
    fn test_parse_valid_manifest() {
        let manifest = parse_manifest(VALID, "Nova", "http://test").unwrap();

        assert_eq!(manifest.version, semver::Version::new(1, 2, 0));
        assert_eq!(
            manifest.download_url,
            "https://releases.example.com/Nova-1.2.0.zip"
        );
        // Digest is normalized to lowercase
        assert_eq!(manifest.digest, "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(manifest.algorithm, HashAlgorithm::Md5);
    }

    #[test]
    fn test_parse_requires_matching_app_id() {
        let result = parse_manifest(VALID, "OtherApp", "http://test");
        assert!(matches!(
            result,
            Err(InstallerError::ManifestParseFailed { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        for missing in ["version", "download", "md5"] {
            let xml = VALID.replace(missing, "other");
            let result = parse_manifest(&xml, "Nova", "http://test");
            assert!(
                matches!(result, Err(InstallerError::ManifestParseFailed { .. })),
                "expected parse failure without {} field",
                missing
            );
        }
    }

    #[test]
    fn test_parse_rejects_empty_fields() {
        let xml = r#"
            <install appId="Nova">
                <version>1.2.0</version>
                <download></download>
                <md5>5d41402abc4b2a76b9719d911017c592</md5>
            </install>
        "#;
        let result = parse_manifest(xml, "Nova", "http://test");
        assert!(matches!(
            result,
            Err(InstallerError::ManifestParseFailed { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_version() {
        let xml = VALID.replace("1.2.0", "not-a-version");
        let result = parse_manifest(&xml, "Nova", "http://test");
        assert!(matches!(
            result,
            Err(InstallerError::ManifestParseFailed { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_invalid_xml() {
        let result = parse_manifest("<install appId=", "Nova", "http://test");
        assert!(matches!(
            result,
            Err(InstallerError::ManifestParseFailed { .. })
        ));
    }

    #[test]
    fn test_versions_order() {
        let newer = parse_manifest(&VALID.replace("1.2.0", "1.10.0"), "Nova", "http://test")
            .unwrap()
            .version;
        let older = parse_manifest(VALID, "Nova", "http://test").unwrap().version;
        assert!(newer > older);
    }
}
