// Configuration types module
// Defines the deserialized configuration layout and the resolved server settings

use serde::Deserialize;
use std::net::{Ipv4Addr, SocketAddr};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerSection,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
}

/// `[server]` section as written by the user
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSection {
    pub port: u16,
    /// Directory to serve, may be relative
    pub dir: String,
    /// Runtime worker threads; zero is rejected at load time
    pub workers: Option<NonZeroUsize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (simple, common or json)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
}

/// Resolved server settings, fixed for the process lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Absolute, lexically normalized directory every request is served from
    pub root_dir: PathBuf,
}

impl ServerConfig {
    /// Loopback-only listen address
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::LOCALHOST, self.port))
    }
}
