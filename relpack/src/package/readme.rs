//! Generated per-release readme.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::config::RepoConfig;
use crate::error::{PackageError, PackageResult};
use crate::github::Release;

/// File name of the generated readme.
pub const README_FILENAME: &str = "README.md";

/// Render the readme text for a release: title, linked release name/URL,
/// and the release's body text (empty when the release has none).
pub fn render_readme(config: &RepoConfig, release: &Release) -> String {
    format!(
        "# {} Binaries\n\nBinaries of [{} {}]({}), via npm\n\n{}\n",
        config.display_name,
        config.display_name,
        release.display_name(),
        release.html_url,
        release.body.as_deref().unwrap_or_default()
    )
}

/// Write the readme document for a release into `dir`.
pub async fn write_readme(
    dir: &Path,
    config: &RepoConfig,
    release: &Release,
) -> PackageResult<PathBuf> {
    let path = dir.join(README_FILENAME);
    fs::write(&path, render_readme(config, release))
        .await
        .map_err(|e| PackageError::WriteFailed {
            path: path.clone(),
            source: e,
        })?;

    Ok(path)
}
