//! Error types
//!
//! `ServeError` covers everything that can go wrong while answering a single
//! request; each variant maps to one HTTP status and never stops the server.
//! `StartupError` covers the fatal conditions reported before serving begins.

use hyper::StatusCode;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Per-request failure, recovered locally as an HTTP status
#[derive(Debug, Error)]
pub enum ServeError {
    /// Normalized path falls outside the served directory
    #[error("path escapes the served directory: {0}")]
    PathEscape(String),

    /// Neither the path nor its `.json` fallback is a regular file
    #[error("not found: {0}")]
    NotFound(String),

    /// Metadata said the file exists but reading it failed
    #[error("failed to read '{}': {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ServeError {
    /// HTTP status reported to the client for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::PathEscape(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ReadFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Fatal startup failure; the process exits non-zero
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("cannot resolve served directory '{}': {source}", path.display())]
    RootDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file: {0}")]
    Logger(#[source] io::Error),

    #[error("runtime error: {0}")]
    Runtime(#[source] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_error_status() {
        assert_eq!(
            ServeError::PathEscape("/../x".to_string()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServeError::NotFound("/MTL/thumbnail".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        let read = ServeError::ReadFailure {
            path: PathBuf::from("/data/MTL/demand.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(read.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(read.to_string().contains("MTL/demand.json"));
    }

    #[test]
    fn test_bind_error_message() {
        let err = StartupError::Bind {
            addr: "127.0.0.1:8080".parse().unwrap(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "address in use"),
        };
        assert_eq!(
            err.to_string(),
            "failed to bind 127.0.0.1:8080: address in use"
        );
    }
}
