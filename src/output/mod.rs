//! Serializers turning a parsed table into spreadsheet-friendly bytes

mod csv;
mod html;
mod xml;

use std::io::Write;

use tracing::debug;

use crate::config::{ExportConfig, ExportFormat};
use crate::error::Result;
use crate::model::Table;

pub use self::csv::CsvOutput;
pub use html::HtmlTableOutput;
pub use xml::{sanitize_sheet_name, XmlSpreadsheetOutput};

/// UTF-8 byte-order mark
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Bytes produced by a serializer together with their MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Trait for table serializers
pub trait TableSerializer: Send + Sync {
    /// Format produced by this serializer
    fn format(&self) -> ExportFormat;

    /// Write a non-empty table to a writer
    fn write_table(&self, table: &Table, has_header: bool, writer: &mut dyn Write) -> Result<()>;

    /// Render a table to bytes.
    ///
    /// An empty table renders nothing: the caller must not send a file.
    fn render(&self, table: &Table, has_header: bool) -> Result<Option<Rendered>> {
        if table.is_empty() {
            debug!(format = %self.format(), "empty table, nothing to render");
            return Ok(None);
        }

        let mut buffer = Vec::new();
        self.write_table(table, has_header, &mut buffer)?;
        debug!(
            format = %self.format(),
            rows = table.row_count(),
            bytes = buffer.len(),
            "rendered table"
        );

        Ok(Some(Rendered {
            bytes: buffer,
            content_type: self.format().content_type(),
        }))
    }
}

/// Factory for creating serializers
pub struct SerializerFactory;

impl SerializerFactory {
    /// Create a serializer for the configured format
    pub fn create(config: &ExportConfig) -> Box<dyn TableSerializer> {
        match config.format {
            ExportFormat::XmlSpreadsheet => Box::new(
                XmlSpreadsheetOutput::new()
                    .with_number_policy(config.number_policy)
                    .with_sheet_name(&config.sheet_name),
            ),
            ExportFormat::HtmlTable => {
                Box::new(HtmlTableOutput::new().with_number_policy(config.number_policy))
            }
            ExportFormat::Csv => Box::new(CsvOutput::new().with_delimiter(config.delimiter)),
        }
    }
}
