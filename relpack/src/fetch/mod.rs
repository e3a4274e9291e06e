//! Asset download subsystem.
//!
//! This module provides the core retrieval logic:
//! - Transport abstraction over raw HTTP responses (`transport`)
//! - Redirect-following download with size verification (`fetcher`)
//! - Process-wide concurrency bounding (`scheduler`)
//!
//! ```text
//! PackageMaterializer
//!         │
//!         ├── DownloadScheduler (one slot by default, FIFO)
//!         │
//!         └── AssetFetcher
//!                 └── AssetTransport (trait)
//!                         └── ReqwestTransport
//! ```

mod fetcher;
mod scheduler;
mod transport;

pub use fetcher::AssetFetcher;
pub use scheduler::{DownloadPermit, DownloadScheduler};
pub use transport::{AssetTransport, BodyStream, ReqwestTransport, TransportResponse};

#[cfg(test)]
pub use transport::tests::{CannedResponse, MockTransport};
