//! Header-keyed binding for callers without a record type.

use crate::types::{Cell, HeaderMap, Row};
use serde_json::Map;

/// Convert a row into a JSON object keyed by header name.
///
/// Cells missing from a short row are omitted. A duplicated header name
/// maps to its last column.
pub fn row_to_map(header: &HeaderMap, row: &Row) -> Map<String, Cell> {
    let mut map = Map::new();
    for name in header.names() {
        if map.contains_key(name) {
            continue;
        }
        if let Some(cell) = header.index_of(name).and_then(|i| row.get(i)) {
            map.insert(name.clone(), cell.clone());
        }
    }
    map
}

/// Build a header-wide row from a JSON object.
///
/// Keys that are not header names are skipped.
pub fn map_to_row(map: &Map<String, Cell>, header: &HeaderMap) -> Row {
    let mut row = vec![Cell::Null; header.width()];
    for (key, value) in map {
        match header.index_of(key) {
            Some(index) => row[index] = value.clone(),
            None => tracing::debug!(column = %key, "Skipping key not in sheet header"),
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_to_map() {
        let header = HeaderMap::new(&[json!("Name"), json!("Age"), json!("City")]);
        let map = row_to_map(&header, &vec![json!("John"), json!(30)]);

        assert_eq!(map.get("Name"), Some(&json!("John")));
        assert_eq!(map.get("Age"), Some(&json!(30)));
        assert!(!map.contains_key("City"));
    }

    #[test]
    fn test_row_to_map_duplicate_header() {
        let header = HeaderMap::new(&[json!("Name"), json!("Name")]);
        let map = row_to_map(&header, &vec![json!("first"), json!("second")]);

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("Name"), Some(&json!("second")));
    }

    #[test]
    fn test_map_to_row() {
        let header = HeaderMap::new(&[json!("Name"), json!("Age"), json!("City")]);
        let object = json!({"Age": 25, "Name": "Jane", "Unknown": true});
        let row = map_to_row(object.as_object().unwrap(), &header);

        assert_eq!(row, vec![json!("Jane"), json!(25), serde_json::Value::Null]);
    }
}
