//! Request dispatch module
//!
//! Entry point for HTTP request processing: answers preflight requests,
//! resolves and loads the file for everything else, and writes the access log.

use crate::config::AppState;
use crate::error::ServeError;
use crate::handler::{resolve, static_files};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let raw_path = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_string(), ToString::to_string);

    Ok(respond(&method, &raw_path, &state, peer_addr).await)
}

/// Build the response for one request
///
/// Every method other than OPTIONS is served like GET.
pub async fn respond(
    method: &Method,
    raw_path: &str,
    state: &AppState,
    peer_addr: SocketAddr,
) -> Response<Full<Bytes>> {
    if *method == Method::OPTIONS {
        return http::build_options_response();
    }

    let started = Instant::now();
    let root = state.server.root_dir.as_path();
    let request_path = resolve::request_path(raw_path);

    let loaded = match resolve::resolve(root, raw_path) {
        Ok(target) => static_files::load_file(root, target, request_path).await,
        Err(err) => Err(err),
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.to_string(),
        method.to_string(),
        request_path.to_string(),
    );

    let response = match loaded {
        Ok(file) => {
            entry.served = Some(file.target.relative_to(root));
            entry.body_bytes = file.content.len();
            http::build_file_response(file.content, file.target.content_type())
        }
        Err(err) => {
            report(&err);
            http::build_error_response(&err, request_path)
        }
    };

    if state.access_log {
        entry.status = response.status().as_u16();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.access_log_format);
    }

    response
}

/// Errors worth more than an access-log line
fn report(err: &ServeError) {
    match err {
        ServeError::PathEscape(path) => {
            logger::log_warning(&format!("Path traversal attempt blocked: {path}"));
        }
        ServeError::ReadFailure { .. } => logger::log_error(&err.to_string()),
        ServeError::NotFound(_) => {}
    }
}
