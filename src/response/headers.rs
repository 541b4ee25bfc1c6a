//! Download header construction

use serde::{Deserialize, Serialize};

use crate::config::ExportFormat;

/// Generated exports are point-in-time snapshots and must never be cached
pub const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Client identity fragments of browsers that do not understand `filename*`
const LEGACY_CLIENT_SIGNATURES: [&str; 2] = ["MSIE ", "Trident/"];

/// Headers attached to a file download response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeaderSet {
    pub content_type: String,
    pub content_disposition: String,
    pub cache_control: String,
}

impl ResponseHeaderSet {
    /// Header name/value pairs in sending order
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            ("Content-Type", self.content_type.as_str()),
            ("Content-Disposition", self.content_disposition.as_str()),
            ("Cache-Control", self.cache_control.as_str()),
        ]
    }
}

impl std::fmt::Display for ResponseHeaderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, value) in self.pairs() {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}

/// Whether the client identity belongs to a browser that only understands
/// the plain `filename="..."` parameter
pub fn is_legacy_client(client_identity: &str) -> bool {
    LEGACY_CLIENT_SIGNATURES
        .iter()
        .any(|signature| client_identity.contains(signature))
}

/// Build the download headers for a generated file.
///
/// The filename is percent-encoded. Modern clients get both the plain and the
/// RFC 5987 `filename*` parameter; legacy clients only get the plain one,
/// which they percent-decode themselves.
pub fn build_headers(
    filename: &str,
    format: ExportFormat,
    client_identity: &str,
) -> ResponseHeaderSet {
    let encoded = urlencoding::encode(filename);

    let content_disposition = if is_legacy_client(client_identity) {
        format!("attachment; filename=\"{}\"", encoded)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            encoded, encoded
        )
    };

    ResponseHeaderSet {
        content_type: format.content_type().to_string(),
        content_disposition,
        cache_control: NO_CACHE.to_string(),
    }
}

/// Append the format's extension when the filename has none
pub fn with_extension(filename: &str, format: ExportFormat) -> String {
    let name = filename.trim();
    let name = if name.is_empty() { "export" } else { name };

    let has_extension = name
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && !ext.is_empty());

    if has_extension {
        name.to_string()
    } else {
        format!("{}.{}", name, format.file_extension())
    }
}
