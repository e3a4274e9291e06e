//! Build command - package specific release versions.

use super::common::{run_versions, Overrides};
use crate::error::CliError;

/// Run the build command for the given version identifiers.
pub async fn run(overrides: &Overrides, versions: Vec<String>) -> Result<(), CliError> {
    run_versions(overrides, &versions).await
}
