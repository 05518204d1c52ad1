//! HTTP protocol layer module
//!
//! Content-type detection and response builders, decoupled from path
//! resolution and file access.

pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{build_error_response, build_file_response, build_options_response};
