//! Relpack CLI - packages upstream GitHub release binaries into versioned,
//! installable packages.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::common::Overrides;

#[derive(Parser)]
#[command(
    name = "relpack",
    version = relpack::VERSION,
    about = "Packages upstream GitHub release binaries into installable packages"
)]
struct Cli {
    /// Path to the config file (default: <config dir>/relpack/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output root for materialized packages
    #[arg(long, global = true, value_name = "DIR")]
    dist_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Number of concurrent asset downloads (minimum 1)
    #[arg(long, global = true, value_name = "N")]
    parallel: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Package the most recent release
    Latest,
    /// Package one or more specific release versions
    Build {
        /// Release tags to package, or `latest`
        #[arg(required = true, value_name = "VERSIONS")]
        versions: Vec<String>,
    },
}

fn main() -> ExitCode {
    relpack::logging::init();

    let cli = Cli::parse();
    let overrides = Overrides {
        config: cli.config,
        dist_dir: cli.dist_dir,
        timeout: cli.timeout,
        parallel: cli.parallel,
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(async {
        match cli.command {
            Commands::Latest => commands::latest::run(&overrides).await,
            Commands::Build { versions } => commands::build::run(&overrides, versions).await,
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
