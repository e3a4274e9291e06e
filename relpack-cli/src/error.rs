//! CLI error types.

use thiserror::Error;

/// Errors surfaced to the CLI user.
#[derive(Debug, Error)]
pub enum CliError {
    /// A packaging operation failed fatally.
    #[error(transparent)]
    Package(#[from] relpack::PackageError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] relpack::config::ConfigError),

    /// The run completed but some releases failed to package.
    #[error("{failed} of {total} releases failed to package")]
    PartialFailure { failed: usize, total: usize },
}
