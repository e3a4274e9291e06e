//! Release-listing and raw-file metadata clients.
//!
//! The traits here are the seams between the core logic and the remote
//! provider, allowing mock clients in tests. [`GitHubClient`] is the real
//! implementation against `api.github.com` and `raw.githubusercontent.com`.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;

use super::types::Release;
use crate::error::{PackageError, PackageResult};

/// User agent sent with every API request. GitHub rejects anonymous agents.
const USER_AGENT: &str = concat!("relpack/", env!("CARGO_PKG_VERSION"));

/// Base URL of the release-listing API.
const API_BASE_URL: &str = "https://api.github.com";

/// Base URL of the raw-file metadata provider.
const RAW_BASE_URL: &str = "https://raw.githubusercontent.com";

/// Paginated release-listing provider.
pub trait ReleaseListing: Send + Sync {
    /// Fetch one page of the release listing (pages start at 1).
    ///
    /// Returns `Ok(None)` when the page is past the end of the listing
    /// (the provider's page-boundary signal), `Ok(Some(..))` with the page's
    /// releases in newest-first order, or an error for any other non-success
    /// status.
    fn page(&self, page: u32) -> impl Future<Output = PackageResult<Option<Vec<Release>>>> + Send;
}

/// Raw-file metadata provider.
pub trait MetadataSource: Send + Sync {
    /// Fetch the content of `path` in the upstream repository at `git_ref`.
    fn raw_file(
        &self,
        git_ref: &str,
        path: &str,
    ) -> impl Future<Output = PackageResult<Vec<u8>>> + Send;
}

/// GitHub implementation of [`ReleaseListing`] and [`MetadataSource`].
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    repo: String,
}

impl GitHubClient {
    /// Create a client for the given `owner/repo` with a request timeout.
    pub fn new(repo: impl Into<String>, timeout: Duration) -> PackageResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| PackageError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            repo: repo.into(),
        })
    }

    /// The upstream repository this client targets.
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl ReleaseListing for GitHubClient {
    async fn page(&self, page: u32) -> PackageResult<Option<Vec<Release>>> {
        let url = format!("{}/repos/{}/releases?page={}", API_BASE_URL, self.repo, page);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| PackageError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        match response.status() {
            // Past the last page; the listing is exhausted.
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let releases =
                    response
                        .json::<Vec<Release>>()
                        .await
                        .map_err(|e| PackageError::ListingParse {
                            page,
                            reason: e.to_string(),
                        })?;
                Ok(Some(releases))
            }
            status => Err(PackageError::ListingFetch {
                page,
                status: status.as_u16(),
            }),
        }
    }
}

impl MetadataSource for GitHubClient {
    async fn raw_file(&self, git_ref: &str, path: &str) -> PackageResult<Vec<u8>> {
        let url = format!("{}/{}/{}/{}", RAW_BASE_URL, self.repo, git_ref, path);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| PackageError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PackageError::MetadataFetch {
                url,
                reason: format!("status {}", status.as_u16()),
            });
        }

        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| PackageError::MetadataFetch {
                url,
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::github::Asset;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Build a release for tests.
    pub fn release(tag: &str, assets: Vec<Asset>) -> Release {
        Release {
            tag_name: tag.to_string(),
            name: Some(format!("{} release", tag)),
            body: Some(format!("Notes for {}", tag)),
            html_url: format!("https://example.com/releases/{}", tag),
            assets,
        }
    }

    /// Build an asset for tests.
    pub fn asset(name: &str, url: &str, size: u64) -> Asset {
        Asset {
            name: name.to_string(),
            browser_download_url: url.to_string(),
            size,
        }
    }

    /// In-memory release listing that counts page requests.
    ///
    /// Pages past the configured set report the page-boundary signal, like
    /// the real provider's 404. An optional failure page simulates a fatal
    /// listing error.
    pub struct MockReleaseListing {
        pages: Vec<Vec<Release>>,
        fail_at: Option<(u32, u16)>,
        requests: AtomicU32,
    }

    impl MockReleaseListing {
        pub fn new(pages: Vec<Vec<Release>>) -> Self {
            Self {
                pages,
                fail_at: None,
                requests: AtomicU32::new(0),
            }
        }

        /// Make the given page fail with the given status.
        pub fn failing_at(mut self, page: u32, status: u16) -> Self {
            self.fail_at = Some((page, status));
            self
        }

        /// Number of page requests made so far.
        pub fn request_count(&self) -> u32 {
            self.requests.load(Ordering::SeqCst)
        }
    }

    impl ReleaseListing for MockReleaseListing {
        async fn page(&self, page: u32) -> PackageResult<Option<Vec<Release>>> {
            self.requests.fetch_add(1, Ordering::SeqCst);

            if let Some((fail_page, status)) = self.fail_at {
                if page == fail_page {
                    return Err(PackageError::ListingFetch { page, status });
                }
            }

            Ok(self.pages.get((page - 1) as usize).cloned())
        }
    }

    /// In-memory raw-file metadata source.
    pub struct MockMetadataSource {
        body: PackageResult<Vec<u8>>,
    }

    impl MockMetadataSource {
        pub fn with_body(body: &[u8]) -> Self {
            Self {
                body: Ok(body.to_vec()),
            }
        }

        pub fn failing(error: PackageError) -> Self {
            Self { body: Err(error) }
        }
    }

    impl MetadataSource for MockMetadataSource {
        async fn raw_file(&self, _git_ref: &str, _path: &str) -> PackageResult<Vec<u8>> {
            match &self.body {
                Ok(body) => Ok(body.clone()),
                Err(PackageError::MetadataFetch { url, reason }) => {
                    Err(PackageError::MetadataFetch {
                        url: url.clone(),
                        reason: reason.clone(),
                    })
                }
                Err(_) => Err(PackageError::MetadataParse {
                    reason: "mock failure".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_client_new() {
        let client = GitHubClient::new("stoplightio/spectral", Duration::from_secs(30)).unwrap();
        assert_eq!(client.repo(), "stoplightio/spectral");
    }

    #[tokio::test]
    async fn test_mock_listing_boundary() {
        let listing = MockReleaseListing::new(vec![vec![release("v1.0.0", vec![])]]);

        assert!(listing.page(1).await.unwrap().is_some());
        assert!(listing.page(2).await.unwrap().is_none());
        assert_eq!(listing.request_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_listing_failure() {
        let listing = MockReleaseListing::new(vec![vec![]]).failing_at(1, 500);

        let err = listing.page(1).await.unwrap_err();
        assert!(matches!(
            err,
            PackageError::ListingFetch {
                page: 1,
                status: 500
            }
        ));
    }
}
