//! Latest command - package the most recent upstream release.

use relpack::resolver::LATEST_SENTINEL;

use super::common::{run_versions, Overrides};
use crate::error::CliError;

/// Run the latest command.
pub async fn run(overrides: &Overrides) -> Result<(), CliError> {
    run_versions(overrides, &[LATEST_SENTINEL.to_string()]).await
}
