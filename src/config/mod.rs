// Configuration module entry point
// Layers defaults, an optional config file, environment variables and CLI flags

mod state;
mod types;

use std::path::{Component, Path, PathBuf};

use crate::cli::Cli;
use crate::error::StartupError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig, ServerSection};

/// Environment variable prefix, e.g. `CITY_DATA_SERVER__PORT=9000`
const ENV_PREFIX: &str = "CITY_DATA";

/// Directory served when neither `--dir` nor `server.dir` is given
const DEFAULT_DATA_DIR: &str = "data";

impl Config {
    /// Load configuration, lowest to highest precedence:
    /// built-in defaults, config file (optional), environment, command line
    pub fn load(cli: &Cli) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&cli.config).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.port", 8080)?
            .set_default("server.dir", default_data_dir().to_string_lossy().into_owned())?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "simple")?
            .set_default("performance.keep_alive", true)?
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option(
                "server.dir",
                cli.dir.as_ref().map(|d| d.to_string_lossy().into_owned()),
            )?
            .set_override_option("server.workers", cli.workers.map(i64::from))?
            .set_override_option("logging.access_log", cli.quiet.then_some(false))?
            .build()?;

        settings.try_deserialize()
    }

    /// Resolve the served directory to an absolute path and freeze the settings
    pub fn server_config(&self) -> Result<ServerConfig, StartupError> {
        let dir = PathBuf::from(&self.server.dir);
        let absolute = std::path::absolute(&dir)
            .map_err(|source| StartupError::RootDir { path: dir, source })?;

        Ok(ServerConfig {
            port: self.server.port,
            root_dir: normalize_lexically(&absolute),
        })
    }
}

/// `data` directory next to the running executable, or `./data` when the
/// executable location cannot be determined
fn default_data_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join(DEFAULT_DATA_DIR)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Drop `.` components and fold `..` into their parent without touching the filesystem
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["city-data-server", "--config", "does-not-exist/none"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::load(&cli(&[])).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.server.dir.ends_with(DEFAULT_DATA_DIR));
        assert!(cfg.server.workers.is_none());
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "simple");
        assert!(cfg.performance.keep_alive);
    }

    #[test]
    fn test_cli_overrides() {
        let cfg = Config::load(&cli(&[
            "--port", "9001", "--dir", "/srv/cities", "--workers", "2", "--quiet",
        ]))
        .unwrap();
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(cfg.server.dir, "/srv/cities");
        assert_eq!(cfg.server.workers.map(std::num::NonZeroUsize::get), Some(2));
        assert!(!cfg.logging.access_log);
    }

    #[test]
    fn test_config_file_layer() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("city-data.toml");
        std::fs::write(
            &file,
            "[server]\nport = 9100\ndir = \"/srv/file-dir\"\n\n[logging]\naccess_log_format = \"json\"\n",
        )
        .unwrap();
        let file_str = file.to_string_lossy().into_owned();

        let from_file = Config::load(&Cli::parse_from([
            "city-data-server",
            "--config",
            file_str.as_str(),
        ]))
        .unwrap();
        assert_eq!(from_file.server.port, 9100);
        assert_eq!(from_file.server.dir, "/srv/file-dir");
        assert_eq!(from_file.logging.access_log_format, "json");

        // Command line beats the file
        let overridden = Config::load(&Cli::parse_from([
            "city-data-server",
            "--config",
            file_str.as_str(),
            "--port",
            "9200",
        ]))
        .unwrap();
        assert_eq!(overridden.server.port, 9200);
        assert_eq!(overridden.server.dir, "/srv/file-dir");
    }

    #[test]
    fn test_zero_workers_in_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("city-data.toml");
        std::fs::write(&file, "[server]\nworkers = 0\n").unwrap();
        let file_str = file.to_string_lossy().into_owned();

        let result = Config::load(&Cli::parse_from([
            "city-data-server",
            "--config",
            file_str.as_str(),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_server_config_is_absolute() {
        let cfg = Config::load(&cli(&["--dir", "my-city-data/./MTL/.."])).unwrap();
        let server = cfg.server_config().unwrap();
        assert!(server.root_dir.is_absolute());
        assert!(server.root_dir.ends_with("my-city-data"));
        assert_eq!(server.socket_addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/srv/./data/../cities")),
            PathBuf::from("/srv/cities")
        );
        assert_eq!(normalize_lexically(Path::new("/..")), PathBuf::from("/"));
    }
}
