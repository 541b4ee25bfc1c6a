//! Parser layer: newline normalization and CSV reading

mod csv;

pub use self::csv::CsvParser;

const BOM: char = '\u{feff}';

/// Collapse CRLF and lone CR into LF and trim outer whitespace.
///
/// A leading byte-order mark is dropped so re-imported exports parse cleanly.
pub fn normalize_newlines(raw: &str) -> String {
    unify_newlines(raw).trim().to_string()
}

/// Drop a leading BOM and collapse CRLF and lone CR into LF, without trimming
fn unify_newlines(raw: &str) -> String {
    let raw = raw.strip_prefix(BOM).unwrap_or(raw);
    raw.replace("\r\n", "\n").replace('\r', "\n")
}
