//! Release-listing provider abstraction.
//!
//! This module provides the wire types and client traits for the remote
//! release listing (paginated releases, newest first) and the raw-file
//! metadata provider used for license lookups.

mod client;
mod types;

pub use client::{GitHubClient, MetadataSource, ReleaseListing};
pub use types::{Asset, Release};

#[cfg(test)]
pub use client::tests::{asset, release, MockMetadataSource, MockReleaseListing};
