//! Asset transport abstraction for testability.
//!
//! The fetcher's redirect and size-check logic operates on
//! [`TransportResponse`] rather than a concrete HTTP client, so redirect
//! chains and mismatched sizes can be exercised with canned responses in
//! tests. [`ReqwestTransport`] is the real implementation; it disables
//! automatic redirect following so the fetcher's bounded hop loop owns
//! redirect handling.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures_util::stream::Stream;
use futures_util::TryStreamExt;
use reqwest::header;

use crate::error::{PackageError, PackageResult};

/// User agent sent with asset requests.
const USER_AGENT: &str = concat!("relpack/", env!("CARGO_PKG_VERSION"));

/// Streamed response body.
pub type BodyStream = Pin<Box<dyn Stream<Item = PackageResult<Bytes>> + Send>>;

/// One HTTP response as seen by the asset fetcher.
pub struct TransportResponse {
    /// Response status code.
    pub status: u16,

    /// `Location` header value, if present.
    pub location: Option<String>,

    /// Declared `Content-Length` header value, if present.
    pub content_length: Option<u64>,

    /// Response body, streamed.
    pub body: BodyStream,
}

impl TransportResponse {
    /// The redirect target, when this response is a 3xx carrying a
    /// `Location` header. A 3xx without a location is not a redirect.
    pub fn redirect_target(&self) -> Option<&str> {
        if (300..400).contains(&self.status) {
            self.location.as_deref()
        } else {
            None
        }
    }
}

/// Transport used by the asset fetcher to issue retrieval requests.
pub trait AssetTransport: Send + Sync {
    /// Issue a GET request. Redirects are reported, not followed.
    fn get(&self, url: &str) -> impl Future<Output = PackageResult<TransportResponse>> + Send;
}

/// Real asset transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout: Duration) -> PackageResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| PackageError::ClientBuild(e.to_string()))?;

        Ok(Self { http })
    }
}

impl AssetTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> PackageResult<TransportResponse> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PackageError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status().as_u16();

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let content_length = response
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());

        let stream_url = url.to_string();
        let body: BodyStream = Box::pin(response.bytes_stream().map_err(move |e| {
            PackageError::Transport {
                url: stream_url.clone(),
                reason: e.to_string(),
            }
        }));

        Ok(TransportResponse {
            status,
            location,
            content_length,
            body,
        })
    }
}
