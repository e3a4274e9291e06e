//! Asset fetcher: redirect-following download with size verification.
//!
//! Retrieves one binary asset to a local destination. Redirect chains are
//! followed transparently with a bounded hop loop; the transport-declared
//! content length and the streamed byte count must both equal the asset's
//! expected size. Bodies stream directly to disk, so large binaries are
//! never buffered in memory.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::transport::{AssetTransport, BodyStream, TransportResponse};
use crate::config::DEFAULT_MAX_REDIRECTS;
use crate::error::{PackageError, PackageResult};

/// Downloads release assets with integrity checks on size.
#[derive(Debug)]
pub struct AssetFetcher<T> {
    transport: T,
    max_redirects: usize,
}

impl<T: AssetTransport> AssetFetcher<T> {
    /// Create a fetcher over the given transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Set the redirect hop limit.
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Fetch one asset from `url` to `dest`, expecting exactly
    /// `expected_size` bytes.
    ///
    /// Follows up to the configured number of redirects. Fails without
    /// writing anything when the final status is not OK or the declared
    /// content length differs from `expected_size`; deletes the partial
    /// file when streaming ends short or errors out. On success the file's
    /// permissions are set to read+execute for everyone (0o555) and the
    /// destination path is returned.
    pub async fn fetch(
        &self,
        dest: &Path,
        url: &str,
        expected_size: u64,
    ) -> PackageResult<PathBuf> {
        let (final_url, response) = self.follow_redirects(url).await?;

        if response.status != 200 {
            return Err(PackageError::UnexpectedStatus {
                url: final_url,
                status: response.status,
            });
        }

        // Check the declared length before writing a single byte.
        if response.content_length != Some(expected_size) {
            return Err(PackageError::SizeMismatch {
                url: final_url,
                expected: expected_size,
                actual: response.content_length,
            });
        }

        tracing::info!(path = %dest.display(), "saving asset");

        let written = match stream_to_file(response.body, dest).await {
            Ok(written) => written,
            Err(e) => {
                // No partial files left behind.
                let _ = fs::remove_file(dest).await;
                return Err(e);
            }
        };

        if written != expected_size {
            let _ = fs::remove_file(dest).await;
            return Err(PackageError::SizeMismatch {
                url: final_url,
                expected: expected_size,
                actual: Some(written),
            });
        }

        set_executable(dest).await?;

        Ok(dest.to_path_buf())
    }

    /// Issue the request, following redirects up to the hop limit.
    ///
    /// Returns the final (non-redirect) response together with the URL it
    /// was served from.
    async fn follow_redirects(&self, url: &str) -> PackageResult<(String, TransportResponse)> {
        let mut current = url.to_string();
        let mut hops = 0usize;

        loop {
            let response = self.transport.get(&current).await?;

            let Some(target) = response.redirect_target() else {
                return Ok((current, response));
            };

            if hops >= self.max_redirects {
                return Err(PackageError::RedirectLimitExceeded {
                    url: current,
                    status: response.status,
                    hops,
                });
            }

            let next = resolve_redirect(&current, target)?;
            tracing::info!(from = %current, to = %next, "following redirect");
            current = next;
            hops += 1;
        }
    }
}

/// Stream a response body to `dest`, returning the byte count written.
async fn stream_to_file(mut body: BodyStream, dest: &Path) -> PackageResult<u64> {
    let mut file = fs::File::create(dest)
        .await
        .map_err(|e| PackageError::WriteFailed {
            path: dest.to_path_buf(),
            source: e,
        })?;

    let mut written: u64 = 0;

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| PackageError::WriteFailed {
                path: dest.to_path_buf(),
                source: e,
            })?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| PackageError::WriteFailed {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(written)
}

/// Set a downloaded binary to read+execute, no write (0o555).
async fn set_executable(dest: &Path) -> PackageResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(dest, std::fs::Permissions::from_mode(0o555))
            .await
            .map_err(|e| PackageError::WriteFailed {
                path: dest.to_path_buf(),
                source: e,
            })?;
    }

    #[cfg(not(unix))]
    let _ = dest;

    Ok(())
}

/// Resolve a redirect target, which may be relative to the current URL.
fn resolve_redirect(base: &str, target: &str) -> PackageResult<String> {
    if let Ok(absolute) = reqwest::Url::parse(target) {
        return Ok(absolute.to_string());
    }

    reqwest::Url::parse(base)
        .and_then(|base_url| base_url.join(target))
        .map(|joined| joined.to_string())
        .map_err(|e| PackageError::Transport {
            url: base.to_string(),
            reason: format!("invalid redirect target {:?}: {}", target, e),
        })
}
