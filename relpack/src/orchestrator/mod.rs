//! Run orchestration.
//!
//! Drives a complete packaging run: resolve the requested versions against
//! the release listing, then materialize each resolved release in turn. A
//! release's materialization completes (including all its asset downloads)
//! before the next release begins, because the download scheduler's bound
//! is shared across the whole run.
//!
//! Per-release failures are recorded and reported rather than aborting the
//! run; a fatal listing error during resolution aborts before any
//! materialization begins.

use std::time::Duration;

use crate::config::ConfigFile;
use crate::error::{PackageError, PackageResult};
use crate::fetch::{AssetFetcher, AssetTransport, DownloadScheduler, ReqwestTransport};
use crate::github::{GitHubClient, MetadataSource, ReleaseListing};
use crate::package::PackageMaterializer;
use crate::resolver::{self, VersionRequest};

/// Outcome of a packaging run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Tags packaged successfully.
    pub succeeded: Vec<String>,

    /// Tags that failed, with the error that stopped them.
    pub failed: Vec<(String, PackageError)>,
}

impl RunSummary {
    /// True when no release failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of releases attempted.
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// A configured packaging run over injected collaborators.
pub struct PackageRun<L, M, T> {
    config: crate::config::RepoConfig,
    listing: L,
    metadata: M,
    fetcher: AssetFetcher<T>,
    scheduler: DownloadScheduler,
}

impl PackageRun<GitHubClient, GitHubClient, ReqwestTransport> {
    /// Build a run against the real GitHub providers from configuration.
    pub fn from_config(config: &ConfigFile) -> PackageResult<Self> {
        let timeout = Duration::from_secs(config.download.timeout_secs);
        let client = GitHubClient::new(config.repo.repo.clone(), timeout)?;
        let transport = ReqwestTransport::new(timeout)?;
        let fetcher =
            AssetFetcher::new(transport).with_max_redirects(config.download.max_redirects);
        let scheduler = DownloadScheduler::new(config.download.parallel_downloads);

        Ok(Self::new(
            config.repo.clone(),
            client.clone(),
            client,
            fetcher,
            scheduler,
        ))
    }
}

impl<L, M, T> PackageRun<L, M, T>
where
    L: ReleaseListing,
    M: MetadataSource,
    T: AssetTransport,
{
    /// Assemble a run from its collaborators.
    pub fn new(
        config: crate::config::RepoConfig,
        listing: L,
        metadata: M,
        fetcher: AssetFetcher<T>,
        scheduler: DownloadScheduler,
    ) -> Self {
        Self {
            config,
            listing,
            metadata,
            fetcher,
            scheduler,
        }
    }

    /// Resolve and materialize the requested versions.
    ///
    /// `versions` are literal tags or the reserved identifier `latest`.
    /// Returns the per-release summary; identifiers that matched no release
    /// are absent from it.
    pub async fn run(&self, versions: &[String]) -> PackageResult<RunSummary> {
        let requests: Vec<VersionRequest> = versions
            .iter()
            .map(|identifier| VersionRequest::parse(identifier))
            .collect();

        let resolved = resolver::resolve(&self.listing, &requests).await?;

        let materializer = PackageMaterializer::new(
            &self.config,
            &self.fetcher,
            &self.metadata,
            &self.scheduler,
        );

        let mut summary = RunSummary::default();
        for entry in &resolved {
            let release = &entry.release;
            tracing::info!(
                tag = %release.tag_name,
                assets = release.assets.len(),
                "materializing release"
            );

            match materializer.materialize(release).await {
                Ok(written) => {
                    tracing::info!(
                        tag = %release.tag_name,
                        files = written.len(),
                        "release packaged"
                    );
                    summary.succeeded.push(release.tag_name.clone());
                }
                Err(error) => {
                    tracing::error!(
                        tag = %release.tag_name,
                        %error,
                        "failed to package release"
                    );
                    summary.failed.push((release.tag_name.clone(), error));
                }
            }
        }

        Ok(summary)
    }
}
