//! CSV text parser

use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::{ExportError, Result};
use crate::model::Table;

use super::unify_newlines;

/// Parser for delimited text.
///
/// Quoted fields may contain the delimiter, doubled quotes and newlines.
/// An unterminated quoted field runs to the end of the input and becomes the
/// last field of the last row.
#[derive(Debug, Clone, Copy)]
pub struct CsvParser {
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Normalize and parse raw text into a table.
    ///
    /// Outer whitespace is trimmed except for the delimiter itself, so a
    /// tab-separated file keeps its leading and trailing empty cells.
    pub fn parse(&self, raw: &str) -> Result<Table> {
        let unified = unify_newlines(raw);
        let delimiter = char::from(self.delimiter);
        let text = unified.trim_matches(|c: char| c.is_whitespace() && c != delimiter);
        if text.is_empty() {
            return Ok(Table::default());
        }

        let (text, open_quote) = drop_blank_lines(text, self.delimiter);
        if open_quote {
            warn!("input ends inside a quoted field; keeping the remainder as one field");
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(text.as_bytes());

        let mut table = Table::default();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|source| ExportError::Csv {
                record: index + 1,
                source,
            })?;
            table.add_row(record.iter().collect());
        }

        debug!(
            rows = table.row_count(),
            width = table.max_width(),
            "parsed CSV input"
        );
        Ok(table)
    }

    /// Parse raw bytes, which must be UTF-8
    pub fn parse_bytes(&self, raw: &[u8]) -> Result<Table> {
        let text = String::from_utf8(raw.to_vec())?;
        self.parse(&text)
    }
}

/// Tracks whether the reader is inside a quoted field
struct QuoteState {
    delimiter: u8,
    in_quotes: bool,
    field_start: bool,
}

impl QuoteState {
    fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            in_quotes: false,
            field_start: true,
        }
    }

    fn feed(&mut self, text: &str) {
        let mut bytes = text.bytes().peekable();
        while let Some(b) = bytes.next() {
            if self.in_quotes {
                if b == b'"' {
                    if bytes.peek() == Some(&b'"') {
                        bytes.next();
                    } else {
                        self.in_quotes = false;
                    }
                }
            } else if b == b'"' && self.field_start {
                self.in_quotes = true;
                self.field_start = false;
            } else {
                self.field_start = b == self.delimiter || b == b'\n';
            }
        }
    }
}

/// Remove whitespace-only physical lines that sit outside quoted fields.
///
/// Returns the remaining text and whether it ends inside an open quote.
fn drop_blank_lines(text: &str, delimiter: u8) -> (String, bool) {
    let delimiter_char = char::from(delimiter);
    let mut state = QuoteState::new(delimiter);
    let mut kept = Vec::new();

    for line in text.split('\n') {
        let blank = line
            .chars()
            .all(|c| c.is_whitespace() && c != delimiter_char);
        if state.in_quotes || !blank {
            kept.push(line);
        }
        state.feed(line);
        state.feed("\n");
    }

    (kept.join("\n"), state.in_quotes)
}
