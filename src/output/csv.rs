//! Canonical CSV output

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::config::ExportFormat;
use crate::error::{ExportError, Result};
use crate::model::Table;

use super::{TableSerializer, UTF8_BOM};

/// Re-emits the table as RFC 4180 CSV, prefixed with a BOM.
///
/// Cells are written verbatim; no type classification applies. Fields are
/// quoted only when needed, unless some cell has leading or trailing
/// whitespace, in which case every field is quoted so the spacing survives
/// re-import.
pub struct CsvOutput {
    delimiter: u8,
}

impl CsvOutput {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Set the output delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSerializer for CsvOutput {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn write_table(&self, table: &Table, _has_header: bool, writer: &mut dyn Write) -> Result<()> {
        writer.write_all(UTF8_BOM)?;

        let mut csv_writer = WriterBuilder::new()
            .flexible(true)
            .delimiter(self.delimiter)
            .quote_style(quote_style(table))
            .terminator(Terminator::CRLF)
            .from_writer(writer);

        for (index, row) in table.rows.iter().enumerate() {
            csv_writer
                .write_record(&row.cells)
                .map_err(|source| ExportError::Csv {
                    record: index + 1,
                    source,
                })?;
        }
        csv_writer.flush()?;

        Ok(())
    }
}

fn quote_style(table: &Table) -> QuoteStyle {
    let padded = table.rows.iter().flat_map(|row| &row.cells).any(|cell| {
        cell.starts_with(char::is_whitespace) || cell.ends_with(char::is_whitespace)
    });

    if padded {
        QuoteStyle::Always
    } else {
        QuoteStyle::Necessary
    }
}
