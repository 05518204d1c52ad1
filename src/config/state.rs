// Application state module
// Read-only state shared by every connection task

use super::types::{Config, ServerConfig};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub server: ServerConfig,
    pub access_log: bool,
    pub access_log_format: String,
    pub keep_alive: bool,
}

impl AppState {
    pub fn new(config: &Config, server: ServerConfig) -> Self {
        Self {
            server,
            access_log: config.logging.access_log,
            access_log_format: config.logging.access_log_format.clone(),
            keep_alive: config.performance.keep_alive,
        }
    }

    /// State serving `root_dir` with default logging, used by tests
    #[cfg(test)]
    pub fn for_root(root_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            server: ServerConfig {
                port: 0,
                root_dir: root_dir.into(),
            },
            access_log: false,
            access_log_format: "simple".to_string(),
            keep_alive: true,
        }
    }
}
