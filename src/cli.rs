//! Command-line surface
//!
//! Every flag is optional so that unset values fall through to the config
//! file, the environment, and finally the built-in defaults.

use clap::Parser;
use std::path::PathBuf;

/// Serve custom city data files to the game over loopback HTTP
///
/// Examples:
///   city-data-server
///   city-data-server --port 8080
///   city-data-server --dir ./my-city-data
#[derive(Debug, Parser)]
#[command(name = "city-data-server", version)]
pub struct Cli {
    /// Port to listen on (default: 8080)
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory to serve (default: `data` next to the executable)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Configuration file, extension optional; a missing file is ignored
    #[arg(long, default_value = "city-data")]
    pub config: String,

    /// Runtime worker threads (default: CPU cores)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub workers: Option<u32>,

    /// Disable the per-request access log
    #[arg(short, long)]
    pub quiet: bool,
}
