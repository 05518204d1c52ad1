//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Startup banner and shutdown notice
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{Config, ServerConfig};

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(server: &ServerConfig, config: &Config) {
    let addr = server.socket_addr();
    let rule = "=".repeat(50);

    write_info("");
    write_info(&rule);
    write_info("  City Data Server");
    write_info(&rule);
    write_info("");
    write_info(&format!("  Serving: {}", server.root_dir.display()));
    write_info(&format!("  URL:     http://{addr}"));
    if let Some(workers) = config.server.workers {
        write_info(&format!("  Workers: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("  Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("  Error log:  {path}"));
    }
    write_info("");
    write_info("  Use in your mod:");
    write_info("  window.SubwayBuilderAPI.registerCity({");
    write_info(&format!("    dataUrl: 'http://{addr}/MTL',"));
    write_info("    // ...other options");
    write_info("  });");
    write_info("");
    write_info("  Press Ctrl+C to stop");
    write_info("");
}

pub fn log_shutdown(signal: &str) {
    write_info(&format!("\n[{signal}] Server stopped"));
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
