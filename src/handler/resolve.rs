//! Request path resolution
//!
//! Turns the raw request target into an absolute path under the served
//! directory. Resolution is purely lexical; nothing here touches the
//! filesystem.

use crate::error::ServeError;
use crate::http::mime;
use percent_encoding::percent_decode_str;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const INDEX_PATH: &str = "/index.html";

/// Absolute file path a request maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub absolute_path: PathBuf,
    /// Lower-cased extension without the dot, empty when absent
    pub extension: String,
}

impl ResolvedTarget {
    pub fn new(absolute_path: PathBuf) -> Self {
        let extension = absolute_path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        Self {
            absolute_path,
            extension,
        }
    }

    /// Same target with `.json` appended to the file name
    pub fn with_json_suffix(&self) -> Self {
        let mut name = OsString::from(self.absolute_path.as_os_str());
        name.push(".json");
        Self::new(PathBuf::from(name))
    }

    pub fn content_type(&self) -> &'static str {
        mime::get_content_type(Some(self.extension.as_str()).filter(|e| !e.is_empty()))
    }

    /// Path relative to the served directory, for log lines
    pub fn relative_to(&self, root: &Path) -> String {
        self.absolute_path
            .strip_prefix(root)
            .unwrap_or(&self.absolute_path)
            .display()
            .to_string()
    }
}

/// Strip the query string and map `/` to the index page
pub fn request_path(raw_path: &str) -> &str {
    let path = raw_path.split_once('?').map_or(raw_path, |(p, _)| p);
    if path == "/" {
        INDEX_PATH
    } else {
        path
    }
}

/// Resolve a raw request target against `root`
///
/// `..` segments are folded while walking; climbing above `root` is a
/// `PathEscape`. The final check compares whole path components, so a root
/// of `/data` never admits `/data-other`.
pub fn resolve(root: &Path, raw_path: &str) -> Result<ResolvedTarget, ServeError> {
    let path = request_path(raw_path);
    let decoded = percent_decode_str(path).decode_utf8_lossy();

    let mut candidate = root.to_path_buf();
    let mut depth = 0usize;
    for segment in decoded.split(std::path::is_separator) {
        match segment {
            "" | "." => {}
            ".." => {
                if depth == 0 {
                    return Err(ServeError::PathEscape(path.to_string()));
                }
                candidate.pop();
                depth -= 1;
            }
            name => {
                candidate.push(name);
                depth += 1;
            }
        }
    }

    if !is_contained(root, &candidate) {
        return Err(ServeError::PathEscape(path.to_string()));
    }

    Ok(ResolvedTarget::new(candidate))
}

/// Component-wise containment: `path` is `root` or lies beneath it
pub fn is_contained(root: &Path, path: &Path) -> bool {
    path.starts_with(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/data")
    }

    #[test]
    fn test_request_path() {
        assert_eq!(request_path("/"), "/index.html");
        assert_eq!(request_path("/?v=2"), "/index.html");
        assert_eq!(request_path("/MTL/demand.json?v=2&x=1"), "/MTL/demand.json");
        assert_eq!(request_path("/MTL/thumbnail"), "/MTL/thumbnail");
    }

    #[test]
    fn test_resolve_plain_path() {
        let target = resolve(&root(), "/MTL/demand.json").unwrap();
        assert_eq!(target.absolute_path, PathBuf::from("/srv/data/MTL/demand.json"));
        assert_eq!(target.extension, "json");
        assert_eq!(target.content_type(), "application/json");
        assert_eq!(target.relative_to(&root()), "MTL/demand.json");
    }

    #[test]
    fn test_resolve_root_is_index() {
        let target = resolve(&root(), "/").unwrap();
        assert_eq!(target.absolute_path, PathBuf::from("/srv/data/index.html"));
        assert_eq!(target.content_type(), "text/html");
    }

    #[test]
    fn test_resolve_no_extension() {
        let target = resolve(&root(), "/MTL/thumbnail").unwrap();
        assert_eq!(target.extension, "");
        assert_eq!(target.content_type(), "application/octet-stream");

        let fallback = target.with_json_suffix();
        assert_eq!(
            fallback.absolute_path,
            PathBuf::from("/srv/data/MTL/thumbnail.json")
        );
        assert_eq!(fallback.content_type(), "application/json");
    }

    #[test]
    fn test_traversal_is_escape() {
        for raw in [
            "/../secrets.txt",
            "/MTL/../../secrets.txt",
            "/%2e%2e/secrets.txt",
            "/MTL/%2E%2E/%2e%2e/etc/passwd",
        ] {
            assert!(
                matches!(resolve(&root(), raw), Err(ServeError::PathEscape(_))),
                "expected escape for {raw}"
            );
        }
    }

    #[test]
    fn test_sibling_directory_is_escape() {
        let err = resolve(&root(), "/../data-other/secret").unwrap_err();
        assert!(matches!(err, ServeError::PathEscape(_)));
        assert!(!is_contained(&root(), Path::new("/srv/data-other/secret")));
        assert!(is_contained(&root(), Path::new("/srv/data/MTL")));
        assert!(is_contained(&root(), &root()));
    }

    #[test]
    fn test_dot_segments_inside_root() {
        let target = resolve(&root(), "/MTL/../MTL/./demand.json").unwrap();
        assert_eq!(target.absolute_path, PathBuf::from("/srv/data/MTL/demand.json"));
    }

    #[test]
    fn test_percent_decoding() {
        let target = resolve(&root(), "/New%20York/roads.geojson").unwrap();
        assert_eq!(
            target.absolute_path,
            PathBuf::from("/srv/data/New York/roads.geojson")
        );
        assert_eq!(target.content_type(), "application/geo+json");
    }

    #[test]
    fn test_uppercase_extension() {
        let target = resolve(&root(), "/MTL/Thumbnail.PNG").unwrap();
        assert_eq!(target.extension, "png");
        assert_eq!(target.content_type(), "image/png");
    }
}
