//! Package materialization: manifest, readme, and asset files per release.

mod manifest;
mod materializer;
mod readme;

pub use manifest::{fetch_license, write_manifest, PackageManifest, MANIFEST_FILENAME};
pub use materializer::PackageMaterializer;
pub use readme::{render_readme, write_readme, README_FILENAME};
