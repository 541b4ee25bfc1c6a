//! Table and Row data structures

use serde::{Deserialize, Serialize};

/// A row of raw cell text, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Cell values exactly as they appeared in the source
    pub cells: Vec<String>,
}

impl Row {
    /// Create a row from its cells
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Get a cell by position
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Number of cells in this row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A parsed table. Rows may have different widths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// All rows in source order
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table from parsed rows
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Append a row
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when there is nothing to export
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row
    pub fn max_width(&self) -> usize {
        self.rows.iter().map(Row::len).max().unwrap_or(0)
    }

    /// Iterate rows together with a flag telling whether the row is the header
    pub fn iter_rows(&self, has_header: bool) -> impl Iterator<Item = (bool, &Row)> {
        self.rows
            .iter()
            .enumerate()
            .map(move |(i, row)| (has_header && i == 0, row))
    }
}

impl<R: Into<Row>> FromIterator<R> for Table {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Row::new(cells)
    }
}

impl From<Vec<&str>> for Row {
    fn from(cells: Vec<&str>) -> Self {
        cells.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_width() {
        let table: Table = vec![vec!["a", "b", "c"], vec!["d"], vec![]]
            .into_iter()
            .collect();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.max_width(), 3);
        assert_eq!(table.rows[1].get(1), None);
    }

    #[test]
    fn test_header_flag_only_marks_first_row() {
        let table: Table = vec![vec!["h"], vec!["1"], vec!["2"]].into_iter().collect();
        let flags: Vec<bool> = table.iter_rows(true).map(|(h, _)| h).collect();
        assert_eq!(flags, vec![true, false, false]);
        assert!(table.iter_rows(false).all(|(h, _)| !h));
    }

    #[test]
    fn test_empty_table() {
        let table = Table::default();
        assert!(table.is_empty());
        assert_eq!(table.max_width(), 0);
    }
}
