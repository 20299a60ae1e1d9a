//! Directory of CSV files as a sheet store.
//!
//! Every cell is read as a string. Writes render cells to text and rewrite
//! the whole file.

use super::{removal_order, SheetStore};
use crate::config::Config;
use crate::types::{render_cell, Cell, Result, Row, Sheet, SheetError};
use std::path::{Path, PathBuf};

/// CSV-backed store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
    config: Config,
}

impl CsvStore {
    /// Create a store with an explicit registry.
    pub fn new(dir: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            dir: dir.into(),
            config,
        }
    }

    /// Open a data directory, loading its registry file if present.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let config = Config::load(&dir)?;
        Ok(Self::new(dir, config))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn path(&self, table: &str) -> Result<PathBuf> {
        self.config.resolve_path(&self.dir, table)
    }

    fn read_sheet(path: &Path) -> Result<Sheet> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut values = Vec::new();
        for record in reader.records() {
            let record = record?;
            values.push(record.iter().map(|s| Cell::String(s.to_string())).collect::<Row>());
        }

        Ok(Sheet::from_values(values).unwrap_or_default())
    }

    fn write_sheet(path: &Path, sheet: &Sheet) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;

        for row in std::iter::once(&sheet.header).chain(sheet.rows.iter()) {
            writer.write_record(row.iter().map(|cell| render_cell(cell).into_owned()))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl SheetStore for CsvStore {
    fn fetch_rows(&self, table: &str) -> Result<Sheet> {
        Self::read_sheet(&self.path(table)?)
    }

    fn append_row(&mut self, table: &str, row: Row) -> Result<()> {
        let path = self.path(table)?;
        let mut sheet = Self::read_sheet(&path)?;
        sheet.rows.push(row);
        Self::write_sheet(&path, &sheet)
    }

    fn update_row(&mut self, table: &str, index: usize, row: Row) -> Result<()> {
        let path = self.path(table)?;
        let mut sheet = Self::read_sheet(&path)?;
        let slot = sheet.rows.get_mut(index).ok_or_else(|| SheetError::RowOutOfRange {
            table: table.to_string(),
            index,
        })?;
        *slot = row;
        Self::write_sheet(&path, &sheet)
    }

    fn delete_rows(&mut self, table_id: &str, indexes: &[usize]) -> Result<()> {
        let path = PathBuf::from(table_id);
        let mut sheet = Self::read_sheet(&path)?;

        if let Some(&index) = indexes.iter().find(|&&i| i >= sheet.rows.len()) {
            return Err(SheetError::RowOutOfRange {
                table: table_id.to_string(),
                index,
            });
        }
        for index in removal_order(indexes) {
            sheet.rows.remove(index);
        }
        Self::write_sheet(&path, &sheet)
    }

    fn resolve_table_id(&self, table: &str) -> Result<String> {
        Ok(self.path(table)?.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_read_and_write() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Users.csv"), "Name,Age\nJohn,30\nJane\n").unwrap();
        let mut store = CsvStore::open(dir.path()).unwrap();

        let sheet = store.fetch_rows("Users").unwrap();
        assert_eq!(sheet.header, vec![json!("Name"), json!("Age")]);
        assert_eq!(sheet.rows[0], vec![json!("John"), json!("30")]);
        assert_eq!(sheet.rows[1], vec![json!("Jane")]);

        store.append_row("Users", vec![json!("Bob"), json!(35)]).unwrap();
        store.update_row("Users", 1, vec![json!("Jane"), json!(25)]).unwrap();

        let content = fs::read_to_string(dir.path().join("Users.csv")).unwrap();
        assert_eq!(content, "Name,Age\nJohn,30\nJane,25\nBob,35\n");
    }

    #[test]
    fn test_registered_path_and_delete() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("people.csv"), "Name\na\nb\nc\n").unwrap();
        let mut config = Config::default();
        config.register("People", "people.csv");
        let mut store = CsvStore::new(dir.path(), config);

        let id = store.resolve_table_id("People").unwrap();
        store.delete_rows(&id, &[2, 0]).unwrap();

        let sheet = store.fetch_rows("People").unwrap();
        assert_eq!(sheet.rows, vec![vec![json!("b")]]);
    }

    #[test]
    fn test_missing_table() {
        let dir = tempdir().unwrap();
        let store = CsvStore::open(dir.path()).unwrap();

        assert!(matches!(store.fetch_rows("Nope"), Err(SheetError::TableNotFound(_))));
    }
}
