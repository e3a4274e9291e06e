//! Configuration for the packaging run.
//!
//! Two configuration surfaces exist: compiled defaults expressed as builder
//! structs ([`RepoConfig`], [`DownloadConfig`]) and an optional `config.ini`
//! overlay loaded by [`ConfigFile`]. CLI flags take precedence over both.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

/// Upstream repository whose releases are packaged, as `owner/repo`.
pub const DEFAULT_REPO: &str = "stoplightio/spectral";

/// Name of the generated package.
pub const DEFAULT_PACKAGE_NAME: &str = "spectral-binaries";

/// Human-readable upstream project name, used in readme and manifest text.
pub const DEFAULT_DISPLAY_NAME: &str = "Spectral";

/// Default output root for materialized packages.
pub const DEFAULT_DIST_DIR: &str = "dist";

/// Default timeout for HTTP requests in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default number of concurrent asset downloads.
///
/// Kept at 1 to avoid overwhelming the remote host and to keep log output
/// strictly ordered. The bound applies across the whole run, not per release.
pub const DEFAULT_PARALLEL_DOWNLOADS: usize = 1;

/// Maximum redirect hops followed per asset download.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read or parsed.
    #[error("failed to load config {path}: {reason}")]
    Load { path: PathBuf, reason: String },

    /// A config value could not be interpreted.
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Upstream repository and package identity configuration.
#[derive(Clone, Debug)]
pub struct RepoConfig {
    /// Upstream GitHub repository as `owner/repo`.
    pub repo: String,

    /// Name written into the generated manifest.
    pub package_name: String,

    /// Human-readable upstream name for generated documents.
    pub display_name: String,

    /// Root directory under which per-release package directories are created.
    pub dist_dir: PathBuf,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            repo: DEFAULT_REPO.to_string(),
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
        }
    }
}

impl RepoConfig {
    /// Create a repo config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the upstream repository.
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = repo.into();
        self
    }

    /// Set the generated package name.
    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    /// Set the display name used in generated documents.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Set the output root directory.
    pub fn with_dist_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dist_dir = dir.into();
        self
    }
}

/// Download behavior configuration.
#[derive(Clone, Debug)]
pub struct DownloadConfig {
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,

    /// Number of asset downloads allowed in flight at once (minimum 1).
    pub parallel_downloads: usize,

    /// Maximum redirect hops followed per asset download.
    pub max_redirects: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            parallel_downloads: DEFAULT_PARALLEL_DOWNLOADS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl DownloadConfig {
    /// Create a download config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the download concurrency bound (clamped to a minimum of 1).
    pub fn with_parallel_downloads(mut self, parallel: usize) -> Self {
        self.parallel_downloads = parallel.max(1);
        self
    }

    /// Set the redirect hop limit.
    pub fn with_max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }
}

/// Loaded configuration file combining all sections.
#[derive(Clone, Debug, Default)]
pub struct ConfigFile {
    /// `[github]` and `[package]` and `[output]` sections.
    pub repo: RepoConfig,

    /// `[download]` section.
    pub download: DownloadConfig,
}

impl ConfigFile {
    /// Default location of the config file (`<config dir>/relpack/config.ini`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("relpack").join("config.ini"))
    }

    /// Load configuration from an INI file, overlaying compiled defaults.
    ///
    /// A missing file is not an error: defaults are returned unchanged.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config = Self::default();

        if let Some(section) = ini.section(Some("github")) {
            if let Some(repo) = section.get("repo") {
                config.repo.repo = repo.to_string();
            }
        }

        if let Some(section) = ini.section(Some("package")) {
            if let Some(name) = section.get("name") {
                config.repo.package_name = name.to_string();
            }
            if let Some(display) = section.get("display_name") {
                config.repo.display_name = display.to_string();
            }
        }

        if let Some(section) = ini.section(Some("output")) {
            if let Some(dir) = section.get("dist_dir") {
                config.repo.dist_dir = PathBuf::from(dir);
            }
        }

        if let Some(section) = ini.section(Some("download")) {
            if let Some(timeout) = section.get("timeout") {
                config.download.timeout_secs = parse_value("download.timeout", timeout)?;
            }
            if let Some(parallel) = section.get("parallel") {
                let parallel: usize = parse_value("download.parallel", parallel)?;
                config.download.parallel_downloads = parallel.max(1);
            }
            if let Some(max) = section.get("max_redirects") {
                config.download.max_redirects = parse_value("download.max_redirects", max)?;
            }
        }

        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_repo_config_default() {
        let config = RepoConfig::default();
        assert_eq!(config.repo, "stoplightio/spectral");
        assert_eq!(config.package_name, "spectral-binaries");
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_repo_config_builder() {
        let config = RepoConfig::new()
            .with_repo("acme/widget")
            .with_package_name("widget-binaries")
            .with_display_name("Widget")
            .with_dist_dir("/tmp/out");

        assert_eq!(config.repo, "acme/widget");
        assert_eq!(config.package_name, "widget-binaries");
        assert_eq!(config.display_name, "Widget");
        assert_eq!(config.dist_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_download_config_default() {
        let config = DownloadConfig::default();
        assert_eq!(config.timeout_secs, 300);
        assert_eq!(config.parallel_downloads, 1);
        assert_eq!(config.max_redirects, 5);
    }

    #[test]
    fn test_download_config_parallel_clamped() {
        let config = DownloadConfig::new().with_parallel_downloads(0);
        assert_eq!(config.parallel_downloads, 1);
    }

    #[test]
    fn test_config_file_missing_path_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigFile::load(&dir.path().join("nope.ini")).unwrap();
        assert_eq!(config.repo.repo, DEFAULT_REPO);
        assert_eq!(config.download.parallel_downloads, DEFAULT_PARALLEL_DOWNLOADS);
    }

    #[test]
    fn test_config_file_load_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[github]").unwrap();
        writeln!(file, "repo = acme/widget").unwrap();
        writeln!(file, "[package]").unwrap();
        writeln!(file, "name = widget-binaries").unwrap();
        writeln!(file, "[download]").unwrap();
        writeln!(file, "timeout = 60").unwrap();
        writeln!(file, "parallel = 2").unwrap();
        drop(file);

        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(config.repo.repo, "acme/widget");
        assert_eq!(config.repo.package_name, "widget-binaries");
        assert_eq!(config.download.timeout_secs, 60);
        assert_eq!(config.download.parallel_downloads, 2);
        // Untouched keys keep their defaults
        assert_eq!(config.download.max_redirects, 5);
    }

    #[test]
    fn test_config_file_invalid_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[download]\ntimeout = soon\n").unwrap();

        let err = ConfigFile::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
