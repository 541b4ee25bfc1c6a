//! XML Spreadsheet 2003 output

use std::io::Write;

use crate::config::ExportFormat;
use crate::error::Result;
use crate::model::{ClassifiedCell, NumberPolicy, Row, Table};

use super::TableSerializer;

/// Excel sheet name maximum length.
const MAX_SHEET_NAME_LEN: usize = 31;
/// Characters not allowed in sheet names.
const SHEET_NAME_ILLEGAL: [char; 7] = ['*', ':', '?', '/', '\\', '[', ']'];

const HEADER_STYLE_ID: &str = "Header";

/// SpreadsheetML serializer.
///
/// Emits a `Default` and a bold `Header` style. Header cells are always
/// `String`; data cells are typed by the configured [`NumberPolicy`].
pub struct XmlSpreadsheetOutput {
    policy: NumberPolicy,
    sheet_name: String,
}

impl XmlSpreadsheetOutput {
    pub fn new() -> Self {
        Self {
            policy: NumberPolicy::default(),
            sheet_name: "Sheet1".to_string(),
        }
    }

    /// Set the number classification policy
    pub fn with_number_policy(mut self, policy: NumberPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the worksheet name; illegal characters are replaced
    pub fn with_sheet_name(mut self, name: &str) -> Self {
        self.sheet_name = sanitize_sheet_name(name);
        self
    }

    fn write_row(&self, writer: &mut dyn Write, row: &Row, is_header: bool) -> Result<()> {
        writeln!(writer, "   <Row>")?;
        for text in &row.cells {
            let cell = if is_header {
                ClassifiedCell::header(text)
            } else {
                ClassifiedCell::new(text, self.policy)
            };

            let style = if is_header {
                format!(" ss:StyleID=\"{}\"", HEADER_STYLE_ID)
            } else {
                String::new()
            };

            writeln!(
                writer,
                "    <Cell{}><Data ss:Type=\"{}\">{}</Data></Cell>",
                style,
                cell.kind,
                xml_escape(cell.text)
            )?;
        }
        writeln!(writer, "   </Row>")?;
        Ok(())
    }
}

impl Default for XmlSpreadsheetOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSerializer for XmlSpreadsheetOutput {
    fn format(&self) -> ExportFormat {
        ExportFormat::XmlSpreadsheet
    }

    fn write_table(&self, table: &Table, has_header: bool, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(writer, "<?mso-application progid=\"Excel.Sheet\"?>")?;
        writeln!(writer, "<Workbook xmlns=\"urn:schemas-microsoft-com:office:spreadsheet\"")?;
        writeln!(writer, " xmlns:o=\"urn:schemas-microsoft-com:office:office\"")?;
        writeln!(writer, " xmlns:x=\"urn:schemas-microsoft-com:office:excel\"")?;
        writeln!(writer, " xmlns:ss=\"urn:schemas-microsoft-com:office:spreadsheet\"")?;
        writeln!(writer, " xmlns:html=\"http://www.w3.org/TR/REC-html40\">")?;

        writeln!(writer, " <Styles>")?;
        writeln!(writer, "  <Style ss:ID=\"Default\" ss:Name=\"Normal\">")?;
        writeln!(writer, "   <Alignment ss:Vertical=\"Bottom\"/>")?;
        writeln!(writer, "   <Font ss:FontName=\"Calibri\" ss:Size=\"11\"/>")?;
        writeln!(writer, "  </Style>")?;
        writeln!(writer, "  <Style ss:ID=\"{}\">", HEADER_STYLE_ID)?;
        writeln!(writer, "   <Font ss:FontName=\"Calibri\" ss:Size=\"11\" ss:Bold=\"1\"/>")?;
        writeln!(writer, "  </Style>")?;
        writeln!(writer, " </Styles>")?;

        writeln!(writer, " <Worksheet ss:Name=\"{}\">", xml_escape(&self.sheet_name))?;
        writeln!(writer, "  <Table>")?;
        for (is_header, row) in table.iter_rows(has_header) {
            self.write_row(writer, row, is_header)?;
        }
        writeln!(writer, "  </Table>")?;
        writeln!(writer, " </Worksheet>")?;
        writeln!(writer, "</Workbook>")?;

        Ok(())
    }
}

/// Replace characters Excel rejects in sheet names and cap the length
pub fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if SHEET_NAME_ILLEGAL.contains(&c) { '_' } else { c })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim_matches('\'').trim();

    if cleaned.is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Escape text for element content and attribute values.
///
/// Newlines become `&#10;` so in-cell line breaks survive; other control
/// characters are not allowed in XML 1.0 and are dropped.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            '\t' => out.push('\t'),
            c if c.is_control() && (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(table: &Table, has_header: bool, output: XmlSpreadsheetOutput) -> String {
        let rendered = output.render(table, has_header).unwrap().unwrap();
        String::from_utf8(rendered.bytes).unwrap()
    }

    fn table(rows: Vec<Vec<&str>>) -> Table {
        rows.into_iter().collect()
    }

    #[test]
    fn test_prologue_and_styles() {
        let xml = render(&table(vec![vec!["a"]]), false, XmlSpreadsheetOutput::new());
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<Style ss:ID=\"Default\" ss:Name=\"Normal\">"));
        assert!(xml.contains("ss:Bold=\"1\""));
        assert!(xml.contains("<Worksheet ss:Name=\"Sheet1\">"));
        assert!(xml.trim_end().ends_with("</Workbook>"));
    }

    #[test]
    fn test_product_example() {
        let t = table(vec![
            vec!["製品名", "価格"],
            vec!["PC", "150000"],
            vec!["01-TEST", "100"],
        ]);
        let xml = render(&t, true, XmlSpreadsheetOutput::new());
        assert!(xml.contains(
            "<Cell ss:StyleID=\"Header\"><Data ss:Type=\"String\">製品名</Data></Cell>"
        ));
        assert!(xml.contains(
            "<Cell ss:StyleID=\"Header\"><Data ss:Type=\"String\">価格</Data></Cell>"
        ));
        assert!(xml.contains("<Cell><Data ss:Type=\"String\">PC</Data></Cell>"));
        assert!(xml.contains("<Cell><Data ss:Type=\"Number\">150000</Data></Cell>"));
        assert!(xml.contains("<Cell><Data ss:Type=\"String\">01-TEST</Data></Cell>"));
        assert!(xml.contains("<Cell><Data ss:Type=\"Number\">100</Data></Cell>"));
    }

    #[test]
    fn test_numeric_header_stays_string() {
        let xml = render(&table(vec![vec!["2024"], vec!["2025"]]), true, XmlSpreadsheetOutput::new());
        assert!(xml.contains("<Cell ss:StyleID=\"Header\"><Data ss:Type=\"String\">2024</Data></Cell>"));
        assert!(xml.contains("<Cell><Data ss:Type=\"Number\">2025</Data></Cell>"));
    }

    #[test]
    fn test_without_header_first_row_is_classified() {
        let xml = render(&table(vec![vec!["2024"]]), false, XmlSpreadsheetOutput::new());
        assert!(!xml.contains("ss:StyleID"));
        assert!(xml.contains("<Data ss:Type=\"Number\">2024</Data>"));
    }

    #[test]
    fn test_long_digits_and_leading_zero_are_strings() {
        let t = table(vec![vec!["12345678901234", "123456789012345", "00123"]]);
        let xml = render(&t, false, XmlSpreadsheetOutput::new());
        assert!(xml.contains("<Data ss:Type=\"Number\">12345678901234</Data>"));
        assert!(xml.contains("<Data ss:Type=\"String\">123456789012345</Data>"));
        assert!(xml.contains("<Data ss:Type=\"String\">00123</Data>"));
    }

    #[test]
    fn test_number_policy_is_configurable() {
        let t = table(vec![vec!["0.5"]]);
        let a = render(&t, false, XmlSpreadsheetOutput::new());
        let b = render(
            &t,
            false,
            XmlSpreadsheetOutput::new().with_number_policy(NumberPolicy::LeadingZeroAware),
        );
        assert!(a.contains("<Data ss:Type=\"Number\">0.5</Data>"));
        assert!(b.contains("<Data ss:Type=\"String\">0.5</Data>"));
    }

    #[test]
    fn test_escaping() {
        let xml = render(&table(vec![vec!["<a & \"b\">", "it's\nhere"]]), false, XmlSpreadsheetOutput::new());
        assert!(xml.contains("&lt;a &amp; &quot;b&quot;&gt;"));
        assert!(xml.contains("it&apos;s&#10;here"));
    }

    #[test]
    fn test_ragged_rows() {
        let xml = render(&table(vec![vec!["a", "b", "c"], vec!["d"]]), true, XmlSpreadsheetOutput::new());
        assert_eq!(xml.matches("<Row>").count(), 2);
        assert_eq!(xml.matches("<Cell").count(), 4);
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("Q1/Q2 [draft]"), "Q1_Q2 _draft_");
        assert_eq!(sanitize_sheet_name(""), "Sheet1");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40)).len(), 31);
        let xml = render(
            &table(vec![vec!["a"]]),
            false,
            XmlSpreadsheetOutput::new().with_sheet_name("R&D"),
        );
        assert!(xml.contains("<Worksheet ss:Name=\"R&amp;D\">"));
    }

    #[test]
    fn test_control_characters_dropped() {
        assert_eq!(xml_escape("a\u{1}b\tc"), "ab\tc");
    }
}
