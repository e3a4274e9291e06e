//! Relpack - packages upstream GitHub release binaries into versioned,
//! installable packages.
//!
//! For each requested version (a literal release tag or the reserved
//! identifier `latest`), relpack resolves a release from the upstream
//! paginated listing and materializes a package directory containing a
//! generated manifest, a generated readme, and the release's binary assets,
//! verifying each download against its declared size.

pub mod config;
pub mod error;
pub mod fetch;
pub mod github;
pub mod logging;
pub mod orchestrator;
pub mod package;
pub mod resolver;

pub use error::{PackageError, PackageResult};
pub use orchestrator::{PackageRun, RunSummary};

/// Crate version, for CLI banners and user agents.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
