//! Local HTTP server for custom city data files.
//!
//! Serves files from a root directory on `127.0.0.1` with permissive CORS
//! headers so a browser-hosted game can fetch them. Paths without a matching
//! file fall back to `<path>.json`.

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
