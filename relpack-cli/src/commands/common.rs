//! Common helpers shared across CLI commands.

use std::path::PathBuf;

use relpack::config::ConfigFile;
use relpack::PackageRun;

use crate::error::CliError;

/// CLI flag values applied on top of the loaded config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub dist_dir: Option<PathBuf>,
    pub timeout: Option<u64>,
    pub parallel: Option<usize>,
}

/// Load configuration with CLI flags taking precedence over file values.
///
/// When no `--config` is given the default location is used; a missing file
/// there falls back to compiled defaults.
pub fn load_config(overrides: &Overrides) -> Result<ConfigFile, CliError> {
    let path = overrides.config.clone().or_else(ConfigFile::default_path);
    let mut config = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            ConfigFile::load(&path)?
        }
        None => ConfigFile::default(),
    };

    if let Some(dir) = &overrides.dist_dir {
        config.repo.dist_dir = dir.clone();
    }
    if let Some(timeout) = overrides.timeout {
        config.download.timeout_secs = timeout;
    }
    if let Some(parallel) = overrides.parallel {
        config.download.parallel_downloads = parallel.max(1);
    }

    Ok(config)
}

/// Resolve and package the requested versions, printing the outcome.
pub async fn run_versions(overrides: &Overrides, versions: &[String]) -> Result<(), CliError> {
    let config = load_config(overrides)?;

    println!(
        "Packaging {} from {}",
        versions.join(", "),
        config.repo.repo
    );

    let run = PackageRun::from_config(&config)?;
    let summary = run.run(versions).await?;

    for tag in &summary.succeeded {
        println!("  packaged {}", tag);
    }
    for (tag, error) in &summary.failed {
        eprintln!("  failed {}: {}", tag, error);
    }
    if summary.attempted() == 0 {
        println!("No releases matched the requested versions.");
    }

    if summary.is_success() {
        Ok(())
    } else {
        Err(CliError::PartialFailure {
            failed: summary.failed.len(),
            total: summary.attempted(),
        })
    }
}
