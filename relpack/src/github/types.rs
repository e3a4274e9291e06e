//! Wire types for the release-listing provider.
//!
//! These mirror the GitHub releases API response shape. Both types are
//! immutable once parsed: the resolver creates them from a listing page and
//! the materializer consumes them; nothing is persisted.

use serde::Deserialize;

/// One downloadable binary file belonging to a release.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    /// File name the asset is saved under.
    pub name: String,

    /// Direct download URL for the asset.
    pub browser_download_url: String,

    /// Declared byte size. Downloads must match this exactly.
    pub size: u64,
}

/// A published, tagged version of the upstream project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Release tag, e.g. `v6.11.1`. Unique within the listing.
    pub tag_name: String,

    /// Display name. The API reports `null` for untitled releases.
    #[serde(default)]
    pub name: Option<String>,

    /// Descriptive body text (release notes), if any.
    #[serde(default)]
    pub body: Option<String>,

    /// Canonical web URL of the release.
    pub html_url: String,

    /// Downloadable assets, in listing order.
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Release {
    /// Display name of the release, falling back to the tag for untitled
    /// releases.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.tag_name)
    }
}
