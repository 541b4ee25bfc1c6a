//! HTML table output labelled as a spreadsheet

use std::io::Write;

use crate::config::ExportFormat;
use crate::error::Result;
use crate::model::{ClassifiedCell, NumberPolicy, Row, Table};

use super::{TableSerializer, UTF8_BOM};

/// Forces the spreadsheet application to keep a cell as text
const TEXT_FORMAT_STYLE: &str = "mso-number-format:'\\@'";
const HEADER_STYLE: &str = "font-weight:bold;background-color:#D9D9D9";

/// HTML table serializer.
///
/// Spreadsheet applications open HTML tables and auto-convert numeric-looking
/// text, so cells classified as strings carry a text number-format hint.
pub struct HtmlTableOutput {
    policy: NumberPolicy,
}

impl HtmlTableOutput {
    pub fn new() -> Self {
        Self {
            policy: NumberPolicy::default(),
        }
    }

    /// Set the number classification policy
    pub fn with_number_policy(mut self, policy: NumberPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for HtmlTableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSerializer for HtmlTableOutput {
    fn format(&self) -> ExportFormat {
        ExportFormat::HtmlTable
    }

    fn write_table(&self, table: &Table, has_header: bool, writer: &mut dyn Write) -> Result<()> {
        writer.write_all(UTF8_BOM)?;

        writeln!(writer, "<html xmlns:o=\"urn:schemas-microsoft-com:office:office\" xmlns:x=\"urn:schemas-microsoft-com:office:excel\" xmlns=\"http://www.w3.org/TR/REC-html40\">")?;
        writeln!(writer, "<head>")?;
        writeln!(writer, "  <meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\">")?;
        writeln!(writer, "  <meta charset=\"UTF-8\">")?;
        writeln!(writer, "</head>")?;
        writeln!(writer, "<body>")?;
        writeln!(writer, "  <table border=\"1\">")?;

        for (is_header, row) in table.iter_rows(has_header) {
            if is_header {
                write_header_row(writer, row)?;
            } else {
                write_data_row(writer, row, self.policy)?;
            }
        }

        writeln!(writer, "  </table>")?;
        writeln!(writer, "</body>")?;
        writeln!(writer, "</html>")?;

        Ok(())
    }
}

fn write_header_row(writer: &mut dyn Write, row: &Row) -> Result<()> {
    writeln!(writer, "    <tr>")?;
    for text in &row.cells {
        let cell = ClassifiedCell::header(text);
        writeln!(
            writer,
            "      <th style=\"{};{}\">{}</th>",
            HEADER_STYLE,
            TEXT_FORMAT_STYLE,
            html_escape(cell.text)
        )?;
    }
    writeln!(writer, "    </tr>")?;
    Ok(())
}

fn write_data_row(writer: &mut dyn Write, row: &Row, policy: NumberPolicy) -> Result<()> {
    writeln!(writer, "    <tr>")?;
    for text in &row.cells {
        let cell = ClassifiedCell::new(text, policy);
        if cell.is_number() {
            writeln!(writer, "      <td>{}</td>", html_escape(cell.text))?;
        } else {
            writeln!(
                writer,
                "      <td style=\"{}\">{}</td>",
                TEXT_FORMAT_STYLE,
                html_escape(cell.text)
            )?;
        }
    }
    writeln!(writer, "    </tr>")?;
    Ok(())
}

/// Escape text for HTML; newlines become in-cell line breaks
fn html_escape(s: impl AsRef<str>) -> String {
    s.as_ref()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('\n', "<br style=\"mso-data-placement:same-cell\">")
}
