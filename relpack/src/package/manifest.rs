//! Generated package manifest.
//!
//! The manifest is an npm-style `package.json` describing the packaged
//! binaries. The license string is looked up from the upstream repository's
//! own manifest at the release tag, via the raw-file metadata provider.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;

use crate::config::RepoConfig;
use crate::error::{PackageError, PackageResult};
use crate::github::{MetadataSource, Release};

/// File name of the generated manifest.
pub const MANIFEST_FILENAME: &str = "package.json";

/// Path of the upstream manifest the license is read from.
const UPSTREAM_MANIFEST_PATH: &str = "package.json";

/// Structured manifest record written per release.
#[derive(Debug, Clone, Serialize)]
pub struct PackageManifest {
    /// Generated package name.
    pub name: String,

    /// Release display name.
    pub version: String,

    /// Description linking back to the upstream release.
    pub description: String,

    /// Module-type flag, always `"module"`.
    #[serde(rename = "type")]
    pub module_type: String,

    /// Upstream license, when the upstream manifest declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl PackageManifest {
    /// Build the manifest for a release.
    pub fn for_release(config: &RepoConfig, release: &Release, license: Option<String>) -> Self {
        Self {
            name: config.package_name.clone(),
            version: release.display_name().to_string(),
            description: format!(
                "Binaries of {} {} ({}), via npm",
                config.display_name,
                release.display_name(),
                release.html_url
            ),
            module_type: "module".to_string(),
            license,
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> PackageResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PackageError::ManifestEncode {
            reason: e.to_string(),
        })
    }
}

/// Look up the upstream license for a release tag.
///
/// Reads the upstream repository's `package.json` at the tag and extracts
/// its `license` field. A manifest without a license field yields `None`;
/// a fetch or parse failure is an error.
pub async fn fetch_license<M: MetadataSource>(
    metadata: &M,
    tag: &str,
) -> PackageResult<Option<String>> {
    let bytes = metadata.raw_file(tag, UPSTREAM_MANIFEST_PATH).await?;

    let value: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| PackageError::MetadataParse {
            reason: e.to_string(),
        })?;

    Ok(value
        .get("license")
        .and_then(|license| license.as_str())
        .map(str::to_string))
}

/// Write the manifest document for a release into `dir`.
pub async fn write_manifest<M: MetadataSource>(
    dir: &Path,
    config: &RepoConfig,
    metadata: &M,
    release: &Release,
) -> PackageResult<PathBuf> {
    let license = fetch_license(metadata, &release.tag_name).await?;
    let manifest = PackageManifest::for_release(config, release, license);

    let path = dir.join(MANIFEST_FILENAME);
    fs::write(&path, manifest.to_json()?)
        .await
        .map_err(|e| PackageError::WriteFailed {
            path: path.clone(),
            source: e,
        })?;

    Ok(path)
}
