//! Static file serving module
//!
//! Locates the file behind a resolved target, applying the `.json` fallback,
//! and reads it whole.

use crate::error::ServeError;
use crate::handler::resolve::{self, ResolvedTarget};
use std::path::Path;
use tokio::fs;

/// A located and fully read file
#[derive(Debug)]
pub struct LoadedFile {
    pub target: ResolvedTarget,
    pub content: Vec<u8>,
}

/// Locate and read the file for `target`
///
/// `request_path` is only used to label a `NotFound`.
pub async fn load_file(
    root: &Path,
    target: ResolvedTarget,
    request_path: &str,
) -> Result<LoadedFile, ServeError> {
    let target = locate(root, target, request_path).await?;

    match fs::read(&target.absolute_path).await {
        Ok(content) => Ok(LoadedFile { target, content }),
        Err(source) => Err(ServeError::ReadFailure {
            path: target.absolute_path,
            source,
        }),
    }
}

/// Exact match first, then the `.json`-suffixed sibling
async fn locate(
    root: &Path,
    target: ResolvedTarget,
    request_path: &str,
) -> Result<ResolvedTarget, ServeError> {
    if is_regular_file(&target.absolute_path).await {
        return Ok(target);
    }

    // The root itself has no name to suffix; `<root>.json` would sit outside it
    let fallback = target.with_json_suffix();
    if resolve::is_contained(root, &fallback.absolute_path)
        && is_regular_file(&fallback.absolute_path).await
    {
        return Ok(fallback);
    }

    Err(ServeError::NotFound(request_path.to_string()))
}

async fn is_regular_file(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|meta| meta.is_file())
}
