//! In-memory sheet store.

use super::{removal_order, SheetStore};
use crate::types::{Result, Row, Sheet, SheetError};
use std::collections::HashMap;

/// Sheets held in memory; ids are insertion ordinals.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sheets: HashMap<String, Sheet>,
    order: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a sheet.
    pub fn add_sheet(&mut self, name: impl Into<String>, sheet: Sheet) {
        let name = name.into();
        if !self.sheets.contains_key(&name) {
            self.order.push(name.clone());
        }
        self.sheets.insert(name, sheet);
    }

    /// Add a sheet from raw values, header first.
    pub fn add_values(&mut self, name: impl Into<String>, values: Vec<Row>) {
        self.add_sheet(name, Sheet::from_values(values).unwrap_or_default());
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut Sheet> {
        self.sheets
            .get_mut(name)
            .ok_or_else(|| SheetError::TableNotFound(name.to_string()))
    }
}

impl SheetStore for MemoryStore {
    fn fetch_rows(&self, table: &str) -> Result<Sheet> {
        self.sheet(table)
            .cloned()
            .ok_or_else(|| SheetError::TableNotFound(table.to_string()))
    }

    fn append_row(&mut self, table: &str, row: Row) -> Result<()> {
        self.sheet_mut(table)?.rows.push(row);
        Ok(())
    }

    fn update_row(&mut self, table: &str, index: usize, row: Row) -> Result<()> {
        let sheet = self.sheet_mut(table)?;
        let slot = sheet.rows.get_mut(index).ok_or_else(|| SheetError::RowOutOfRange {
            table: table.to_string(),
            index,
        })?;
        *slot = row;
        Ok(())
    }

    fn delete_rows(&mut self, table_id: &str, indexes: &[usize]) -> Result<()> {
        let name = table_id
            .parse::<usize>()
            .ok()
            .and_then(|id| self.order.get(id).cloned())
            .ok_or_else(|| SheetError::TableNotFound(table_id.to_string()))?;
        let sheet = self.sheet_mut(&name)?;

        // Validate everything before removing anything
        if let Some(&index) = indexes.iter().find(|&&i| i >= sheet.rows.len()) {
            return Err(SheetError::RowOutOfRange { table: name, index });
        }
        for index in removal_order(indexes) {
            sheet.rows.remove(index);
        }
        Ok(())
    }

    fn resolve_table_id(&self, table: &str) -> Result<String> {
        self.order
            .iter()
            .position(|name| name == table)
            .map(|id| id.to_string())
            .ok_or_else(|| SheetError::TableNotFound(table.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.add_values("Empty", vec![]);
        store.add_values(
            "TestSheet",
            vec![
                vec![json!("Name"), json!("Age")],
                vec![json!("John"), json!(30)],
                vec![json!("Jane"), json!(25)],
            ],
        );
        store
    }

    #[test]
    fn test_fetch_rows() {
        let store = store();
        let sheet = store.fetch_rows("TestSheet").unwrap();

        assert_eq!(sheet.header.len(), 2);
        assert_eq!(sheet.rows.len(), 2);
        assert!(store.fetch_rows("Empty").unwrap().header.is_empty());
        assert!(matches!(store.fetch_rows("Nope"), Err(SheetError::TableNotFound(_))));
    }

    #[test]
    fn test_resolve_table_id() {
        let store = store();
        assert_eq!(store.resolve_table_id("Empty").unwrap(), "0");
        assert_eq!(store.resolve_table_id("TestSheet").unwrap(), "1");
        assert!(store.resolve_table_id("Nope").is_err());
    }

    #[test]
    fn test_write_rows() {
        let mut store = store();
        store.append_row("TestSheet", vec![json!("Bob"), json!(35)]).unwrap();
        store.update_row("TestSheet", 0, vec![json!("Johnny"), json!(31)]).unwrap();

        let sheet = store.sheet("TestSheet").unwrap();
        assert_eq!(sheet.rows[0][0], json!("Johnny"));
        assert_eq!(sheet.rows[2][0], json!("Bob"));

        assert!(matches!(
            store.update_row("TestSheet", 9, vec![]),
            Err(SheetError::RowOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_delete_rows_any_order() {
        let mut store = store();
        store.append_row("TestSheet", vec![json!("Bob"), json!(35)]).unwrap();
        store.delete_rows("1", &[0, 2]).unwrap();

        let sheet = store.sheet("TestSheet").unwrap();
        assert_eq!(sheet.rows, vec![vec![json!("Jane"), json!(25)]]);
    }

    #[test]
    fn test_delete_rows_is_all_or_nothing() {
        let mut store = store();
        assert!(store.delete_rows("1", &[0, 5]).is_err());
        assert_eq!(store.sheet("TestSheet").unwrap().rows.len(), 2);
    }
}
