//! Request handler module
//!
//! Responsible for request dispatch, path resolution and static file loading.

pub mod resolve;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
