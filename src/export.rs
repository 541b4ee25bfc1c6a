//! Export pipeline: parse, render, and build download headers

use tracing::{debug, info};

use crate::config::ExportConfig;
use crate::error::Result;
use crate::model::Table;
use crate::output::SerializerFactory;
use crate::parser::CsvParser;
use crate::response::{build_headers, with_extension, ResponseHeaderSet};

/// A parsed table ready to be rendered
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub table: Table,
    /// Download filename offered to the client
    pub filename: String,
    /// Render the first row as a header
    pub has_header: bool,
}

impl ExportRequest {
    pub fn new(table: Table, filename: impl Into<String>) -> Self {
        Self {
            table,
            filename: filename.into(),
            has_header: false,
        }
    }

    /// Treat the first row as a header
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }
}

/// Rendered bytes plus the headers to send with them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub body: Vec<u8>,
    pub headers: ResponseHeaderSet,
}

/// Render a request in the configured format.
///
/// Returns `Ok(None)` for an empty table: there is no file and no headers to send.
pub fn export_table(
    request: &ExportRequest,
    config: &ExportConfig,
    client_identity: &str,
) -> Result<Option<ExportArtifact>> {
    let serializer = SerializerFactory::create(config);

    let Some(rendered) = serializer.render(&request.table, request.has_header)? else {
        debug!(filename = %request.filename, "nothing to export");
        return Ok(None);
    };

    let headers = build_headers(&request.filename, config.format, client_identity);
    info!(
        format = %config.format,
        filename = %request.filename,
        rows = request.table.row_count(),
        bytes = rendered.bytes.len(),
        "export rendered"
    );

    Ok(Some(ExportArtifact {
        body: rendered.bytes,
        headers,
    }))
}

/// Parse raw CSV text and export it.
///
/// The filename gets the format's extension if it has none.
pub fn export_csv(
    raw: &str,
    filename: &str,
    config: &ExportConfig,
    client_identity: &str,
) -> Result<Option<ExportArtifact>> {
    let table = CsvParser::new()
        .with_delimiter(config.delimiter)
        .parse(raw)?;

    let request = ExportRequest::new(table, with_extension(filename, config.format))
        .with_header(config.has_header);

    export_table(&request, config, client_identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportFormat;

    const SAMPLE: &str = "\"製品名\",\"価格\"\n\"PC\",150000\n\"01-TEST\",100";

    #[test]
    fn test_empty_input_produces_nothing() {
        for format in [ExportFormat::XmlSpreadsheet, ExportFormat::HtmlTable, ExportFormat::Csv] {
            let config = ExportConfig::new(format).with_header(true);
            assert_eq!(export_csv("", "empty", &config, "").unwrap(), None);
            assert_eq!(export_csv("\r\n\r\n", "empty", &config, "").unwrap(), None);
        }
    }

    #[test]
    fn test_headers_match_body_format() {
        for format in [ExportFormat::XmlSpreadsheet, ExportFormat::HtmlTable, ExportFormat::Csv] {
            let config = ExportConfig::new(format).with_header(true);
            let artifact = export_csv(SAMPLE, "製品リスト", &config, "Firefox")
                .unwrap()
                .unwrap();
            assert_eq!(artifact.headers.content_type, format.content_type());
            assert!(artifact
                .headers
                .content_disposition
                .contains(&format!(".{}", format.file_extension())));
            assert!(!artifact.body.is_empty());
        }
    }

    #[test]
    fn test_export_table_keeps_filename() {
        let table: Table = vec![vec!["a"]].into_iter().collect();
        let request = ExportRequest::new(table, "data");
        let artifact = export_table(&request, &ExportConfig::new(ExportFormat::Csv), "")
            .unwrap()
            .unwrap();
        assert!(artifact
            .headers
            .content_disposition
            .starts_with("attachment; filename=\"data\""));
    }

    #[test]
    fn test_delimiter_applies_to_parsing() {
        let config = ExportConfig::new(ExportFormat::Csv).with_delimiter(b';');
        let artifact = export_csv("a;b\n1;2", "x.csv", &config, "").unwrap().unwrap();
        assert_eq!(&artifact.body[3..], b"a;b\r\n1;2\r\n");
    }
}
