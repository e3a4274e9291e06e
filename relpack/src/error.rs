//! Error types for packaging operations.

use std::io;
use std::path::PathBuf;

/// Result type for packaging operations.
pub type PackageResult<T> = Result<T, PackageError>;

/// Errors that can occur while resolving, downloading, and materializing
/// release packages.
#[derive(Debug)]
pub enum PackageError {
    /// Network or connection failure while talking to a remote host.
    Transport { url: String, reason: String },

    /// A non-success, non-redirect response status for an asset download.
    UnexpectedStatus { url: String, status: u16 },

    /// A redirect chain exceeded the configured hop limit.
    RedirectLimitExceeded {
        url: String,
        status: u16,
        hops: usize,
    },

    /// The declared or received byte count differs from the asset's
    /// expected size. `actual` is `None` when the server sent no
    /// Content-Length header.
    SizeMismatch {
        url: String,
        expected: u64,
        actual: Option<u64>,
    },

    /// A release-listing page request failed with a non-404 error status.
    ListingFetch { page: u32, status: u16 },

    /// A release-listing page could not be parsed.
    ListingParse { page: u32, reason: String },

    /// Failed to fetch license metadata from the raw-file provider.
    MetadataFetch { url: String, reason: String },

    /// Failed to parse license metadata.
    MetadataParse { reason: String },

    /// Failed to serialize the generated manifest document.
    ManifestEncode { reason: String },

    /// Failed to create a directory.
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// Failed to write a file.
    WriteFailed { path: PathBuf, source: io::Error },

    /// Failed to construct an HTTP client.
    ClientBuild(String),
}

impl std::fmt::Display for PackageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { url, reason } => {
                write!(f, "transport error for {}: {}", url, reason)
            }
            Self::UnexpectedStatus { url, status } => {
                write!(f, "unexpected status {} for {}", status, url)
            }
            Self::RedirectLimitExceeded { url, status, hops } => {
                write!(
                    f,
                    "{} for {}, but exceeded maximum redirect count ({} hops)",
                    status, url, hops
                )
            }
            Self::SizeMismatch {
                url,
                expected,
                actual,
            } => match actual {
                Some(actual) => {
                    write!(f, "expecting {} bytes for {}, got {}", expected, url, actual)
                }
                None => write!(
                    f,
                    "expecting {} bytes for {}, got no content length",
                    expected, url
                ),
            },
            Self::ListingFetch { page, status } => {
                write!(
                    f,
                    "release page {} had a response status {}, cannot find remaining versions",
                    page, status
                )
            }
            Self::ListingParse { page, reason } => {
                write!(f, "failed to parse release page {}: {}", page, reason)
            }
            Self::MetadataFetch { url, reason } => {
                write!(f, "failed to fetch metadata from {}: {}", url, reason)
            }
            Self::MetadataParse { reason } => {
                write!(f, "failed to parse metadata: {}", reason)
            }
            Self::ManifestEncode { reason } => {
                write!(f, "failed to encode manifest: {}", reason)
            }
            Self::CreateDirFailed { path, source } => {
                write!(
                    f,
                    "failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::WriteFailed { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            Self::ClientBuild(reason) => {
                write!(f, "failed to construct HTTP client: {}", reason)
            }
        }
    }
}

impl std::error::Error for PackageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateDirFailed { source, .. } => Some(source),
            Self::WriteFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
