//! Configuration handling for sheetexport

use serde::{Deserialize, Serialize};

use crate::model::NumberPolicy;

/// Output format of an export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// XML Spreadsheet 2003 markup
    #[default]
    XmlSpreadsheet,
    /// HTML table labelled as a spreadsheet
    HtmlTable,
    /// Re-quoted CSV
    Csv,
}

impl ExportFormat {
    /// MIME type sent with the artifact.
    ///
    /// The HTML rendition is labelled as a spreadsheet so the browser hands it
    /// to the spreadsheet application instead of rendering it.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::XmlSpreadsheet => "application/vnd.ms-excel",
            ExportFormat::HtmlTable => "application/vnd.ms-excel; charset=UTF-8",
            ExportFormat::Csv => "text/csv; charset=UTF-8",
        }
    }

    /// Extension appended to filenames that have none
    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::XmlSpreadsheet => "xml",
            ExportFormat::HtmlTable => "xls",
            ExportFormat::Csv => "csv",
        }
    }

    /// Whether the rendered bytes start with a UTF-8 byte-order mark
    pub fn has_bom(&self) -> bool {
        !matches!(self, ExportFormat::XmlSpreadsheet)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" | "xml-spreadsheet" => Ok(ExportFormat::XmlSpreadsheet),
            "html" | "html-table" => Ok(ExportFormat::HtmlTable),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::XmlSpreadsheet => write!(f, "xml-spreadsheet"),
            ExportFormat::HtmlTable => write!(f, "html-table"),
            ExportFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Configuration for one export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Output format
    pub format: ExportFormat,
    /// Treat the first row as a header
    pub has_header: bool,
    /// Field delimiter for reading and for CSV output
    pub delimiter: u8,
    /// Rule for presenting numeric-looking cells
    pub number_policy: NumberPolicy,
    /// Worksheet name used by the XML Spreadsheet format
    pub sheet_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            has_header: false,
            delimiter: b',',
            number_policy: NumberPolicy::default(),
            sheet_name: "Sheet1".to_string(),
        }
    }
}

impl ExportConfig {
    /// Create a config for the given format
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    /// Set output format
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Treat the first row as a header
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set number classification policy
    pub fn with_number_policy(mut self, policy: NumberPolicy) -> Self {
        self.number_policy = policy;
        self
    }

    /// Set worksheet name
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }
}
