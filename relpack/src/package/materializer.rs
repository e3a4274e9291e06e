//! Package materialization.
//!
//! Produces the on-disk package directory for a resolved release: the
//! manifest document, the readme document, and every asset belonging to the
//! release. The three categories of work run independently and are joined
//! at completion; asset downloads additionally pass through the download
//! scheduler so they serialize against downloads from other releases.

use std::path::{Path, PathBuf};

use futures_util::future::try_join_all;
use tokio::fs;

use super::{manifest, readme};
use crate::config::RepoConfig;
use crate::error::{PackageError, PackageResult};
use crate::fetch::{AssetFetcher, AssetTransport, DownloadScheduler};
use crate::github::{Asset, MetadataSource, Release};

/// Builds the package directory for resolved releases.
pub struct PackageMaterializer<'a, T, M> {
    config: &'a RepoConfig,
    fetcher: &'a AssetFetcher<T>,
    metadata: &'a M,
    scheduler: &'a DownloadScheduler,
}

impl<'a, T: AssetTransport, M: MetadataSource> PackageMaterializer<'a, T, M> {
    pub fn new(
        config: &'a RepoConfig,
        fetcher: &'a AssetFetcher<T>,
        metadata: &'a M,
        scheduler: &'a DownloadScheduler,
    ) -> Self {
        Self {
            config,
            fetcher,
            metadata,
            scheduler,
        }
    }

    /// Materialize one release under `<dist_dir>/<tag>`.
    ///
    /// Directory creation is recursive and idempotent: a pre-existing
    /// directory is not an error. Returns the paths of every written
    /// artifact; any failed artifact fails the whole release.
    pub async fn materialize(&self, release: &Release) -> PackageResult<Vec<PathBuf>> {
        let dir = self.config.dist_dir.join(&release.tag_name);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| PackageError::CreateDirFailed {
                path: dir.clone(),
                source: e,
            })?;

        let downloads = try_join_all(
            release
                .assets
                .iter()
                .map(|asset| self.download_asset(&dir, asset)),
        );

        let (manifest_path, readme_path, mut asset_paths) = tokio::try_join!(
            manifest::write_manifest(&dir, self.config, self.metadata, release),
            readme::write_readme(&dir, self.config, release),
            downloads,
        )?;

        let mut written = vec![manifest_path, readme_path];
        written.append(&mut asset_paths);
        Ok(written)
    }

    /// Download one asset, holding a scheduler slot for the duration.
    async fn download_asset(&self, dir: &Path, asset: &Asset) -> PackageResult<PathBuf> {
        let dest = dir.join(&asset.name);
        let _permit = self.scheduler.acquire().await;
        self.fetcher
            .fetch(&dest, &asset.browser_download_url, asset.size)
            .await
    }
}
