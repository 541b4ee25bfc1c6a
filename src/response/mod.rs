//! Response headers for delivering an export as a file download

mod headers;

pub use headers::{build_headers, is_legacy_client, with_extension, ResponseHeaderSet, NO_CACHE};
