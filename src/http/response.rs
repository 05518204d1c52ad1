//! HTTP response building module
//!
//! Provides builders for every status the server emits. Each builder attaches
//! the CORS header set so cross-origin fetches from the game see the status
//! whatever the outcome.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};

use crate::error::ServeError;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Response builder with the CORS headers already set
fn cors_builder(status: StatusCode) -> Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    cors_builder(StatusCode::NO_CONTENT)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("204", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response carrying a whole file
pub fn build_file_response(data: Vec<u8>, content_type: &str) -> Response<Full<Bytes>> {
    let content_length = data.len();

    cors_builder(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(data)))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build the plain-text error response for a failed request
///
/// `request_path` is the query-stripped path the client asked for; it is
/// echoed back in the 404 body.
pub fn build_error_response(error: &ServeError, request_path: &str) -> Response<Full<Bytes>> {
    let status = error.status();
    let body = match error {
        ServeError::PathEscape(_) => "Forbidden".to_string(),
        ServeError::NotFound(_) => format!("Not found: {request_path}"),
        ServeError::ReadFailure { .. } => "Server error".to_string(),
    };

    cors_builder(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(body.clone())))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from(body)))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
