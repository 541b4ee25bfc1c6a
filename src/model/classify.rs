//! Cell type classification for spreadsheet output

use serde::{Deserialize, Serialize};

/// Numeric text of this many characters or more is kept as a string.
///
/// Spreadsheet numbers hold about 15 significant digits; longer values lose precision.
pub const MAX_NUMERIC_LEN: usize = 15;

/// Presentation type of a cell in spreadsheet output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Number,
    String,
}

impl CellKind {
    /// `ss:Type` value used by XML Spreadsheet markup
    pub fn as_str(&self) -> &'static str {
        match self {
            CellKind::Number => "Number",
            CellKind::String => "String",
        }
    }
}

impl std::fmt::Display for CellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule deciding when numeric-looking text is presented as a number
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberPolicy {
    /// Numeric and shorter than [`MAX_NUMERIC_LEN`].
    ///
    /// Not a bare length cutoff: a redundant leading zero in the integer part
    /// also makes the cell a string, so `"0123"` keeps its zero while `"0.5"`
    /// stays a number.
    #[default]
    LengthCutoff,
    /// As `LengthCutoff`, but any text longer than one character that starts
    /// with `0` is a string (`"0.5"` included).
    LeadingZeroAware,
}

impl std::str::FromStr for NumberPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "length-cutoff" | "a" => Ok(NumberPolicy::LengthCutoff),
            "leading-zero-aware" | "b" => Ok(NumberPolicy::LeadingZeroAware),
            _ => Err(format!("Unknown number policy: {}", s)),
        }
    }
}

/// A cell's text paired with its presentation type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedCell<'a> {
    pub text: &'a str,
    pub kind: CellKind,
}

impl<'a> ClassifiedCell<'a> {
    /// Classify a data cell
    pub fn new(text: &'a str, policy: NumberPolicy) -> Self {
        Self {
            text,
            kind: classify(text, policy),
        }
    }

    /// A header cell, never numeric
    pub fn header(text: &'a str) -> Self {
        Self {
            text,
            kind: CellKind::String,
        }
    }

    pub fn is_number(&self) -> bool {
        self.kind == CellKind::Number
    }
}

/// Decide whether a cell should be presented as a number or as text
pub fn classify(text: &str, policy: NumberPolicy) -> CellKind {
    if !is_numeric(text) || text.chars().count() >= MAX_NUMERIC_LEN {
        return CellKind::String;
    }

    if has_redundant_leading_zero(text) {
        return CellKind::String;
    }

    if policy == NumberPolicy::LeadingZeroAware && text.len() > 1 && text.starts_with('0') {
        return CellKind::String;
    }

    CellKind::Number
}

/// Decimal number with optional sign, fraction and exponent; no whitespace
pub fn is_numeric(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// `0` followed by another digit at the start of the integer part
fn has_redundant_leading_zero(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let mut chars = unsigned.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('0'), Some(c)) if c.is_ascii_digit()
    )
}
