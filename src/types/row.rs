//! Rows, sheets, and header lookup.

use super::value::render_cell;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// Untyped cell as delivered by the store.
pub type Cell = serde_json::Value;

/// Ordered cells of one sheet row. May be shorter than the header.
pub type Row = Vec<Cell>;

/// Header row plus data rows, as returned by a single fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// First row of the sheet
    pub header: Row,

    /// Remaining rows in source order
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create a sheet from a header and data rows.
    pub fn new(header: Row, rows: Vec<Row>) -> Self {
        Self { header, rows }
    }

    /// Split raw values (header first) into a sheet.
    ///
    /// Returns `None` when there are no rows at all.
    pub fn from_values(mut values: Vec<Row>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let header = values.remove(0);
        Some(Self { header, rows: values })
    }

    /// Build the column lookup for this sheet's header.
    pub fn header_map(&self) -> HeaderMap {
        HeaderMap::new(&self.header)
    }
}

/// Column name to zero-based index, derived from a header row.
///
/// Names are case-sensitive. Duplicate names resolve to the last occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMap {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl HeaderMap {
    /// Build from a header row.
    pub fn new(header: &[Cell]) -> Self {
        let names: Vec<String> = header.iter().map(|c| render_cell(c).into_owned()).collect();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { names, index }
    }

    /// Index of `column`, if present.
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    /// Header names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of header columns (duplicates included).
    pub fn width(&self) -> usize {
        self.names.len()
    }

    /// Rendered cell for `column` in `row`.
    ///
    /// `None` when the column is not in the header or the row is too short.
    pub fn cell<'r>(&self, row: &'r [Cell], column: &str) -> Option<Cow<'r, str>> {
        self.index_of(column)
            .and_then(|i| row.get(i))
            .map(render_cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_map_lookup() {
        let header = vec![json!("ID"), json!("Name"), json!("Age")];
        let map = HeaderMap::new(&header);

        assert_eq!(map.index_of("Name"), Some(1));
        assert_eq!(map.index_of("name"), None);
        assert_eq!(map.width(), 3);
    }

    #[test]
    fn test_duplicate_header_shadows() {
        let header = vec![json!("Name"), json!("Age"), json!("Name")];
        let map = HeaderMap::new(&header);

        assert_eq!(map.index_of("Name"), Some(2));
        assert_eq!(map.names().len(), 3);
    }

    #[test]
    fn test_short_row_cell() {
        let map = HeaderMap::new(&[json!("Name"), json!("City")]);
        let row = vec![json!("John")];

        assert_eq!(map.cell(&row, "Name").as_deref(), Some("John"));
        assert_eq!(map.cell(&row, "City"), None);
        assert_eq!(map.cell(&row, "Missing"), None);
    }

    #[test]
    fn test_sheet_from_values() {
        let sheet = Sheet::from_values(vec![vec![json!("A")], vec![json!(1)]]).unwrap();
        assert_eq!(sheet.header, vec![json!("A")]);
        assert_eq!(sheet.rows.len(), 1);

        assert!(Sheet::from_values(vec![]).is_none());
    }
}
