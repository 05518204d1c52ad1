//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.

/// Get MIME Content-Type based on file extension
///
/// Matching is case-insensitive; unknown or missing extensions fall back to
/// `application/octet-stream`.
///
/// # Examples
/// ```
/// use city_data_server::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("json")), "application/json");
/// assert_eq!(get_content_type(Some("GeoJSON")), "application/geo+json");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return OCTET_STREAM;
    };

    match ext.to_ascii_lowercase().as_str() {
        "html" => "text/html",
        "js" => "application/javascript",
        "css" => "text/css",
        "json" => "application/json",
        "geojson" => "application/geo+json",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",

        _ => OCTET_STREAM,
    }
}

const OCTET_STREAM: &str = "application/octet-stream";
