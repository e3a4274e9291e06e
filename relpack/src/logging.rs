//! Logging initialization.
//!
//! Installs a `tracing` subscriber writing to stderr. The filter defaults to
//! `info` and can be overridden with `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Call once at process startup. Subsequent calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
