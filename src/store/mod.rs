//! Sheet store: the collaborator that fetches and writes raw rows.
//!
//! The query layer never talks to a remote service itself. It fetches a
//! fresh [`Sheet`] per request and hands write rows back through this
//! trait. Calls are blocking; retries and batching are the store's concern.
//!
//! Row indexes are zero-based positions among the data rows (header
//! excluded).

pub mod csv_dir;
pub mod memory;

pub use csv_dir::CsvStore;
pub use memory::MemoryStore;

use crate::types::{Result, Row, Sheet};

/// Backing store addressed by sheet name.
pub trait SheetStore {
    /// Fetch the header and all data rows of `table`.
    ///
    /// A sheet without any rows yields an empty header.
    fn fetch_rows(&self, table: &str) -> Result<Sheet>;

    /// Append a data row.
    fn append_row(&mut self, table: &str, row: Row) -> Result<()>;

    /// Replace the data row at `index`.
    fn update_row(&mut self, table: &str, index: usize, row: Row) -> Result<()>;

    /// Remove data rows from the sheet identified by `table_id`.
    fn delete_rows(&mut self, table_id: &str, indexes: &[usize]) -> Result<()>;

    /// Resolve the store's identifier for `table`.
    fn resolve_table_id(&self, table: &str) -> Result<String>;
}

/// Sort descending and drop duplicates, so removals keep earlier indexes valid.
pub(crate) fn removal_order(indexes: &[usize]) -> Vec<usize> {
    let mut ordered = indexes.to_vec();
    ordered.sort_unstable_by(|a, b| b.cmp(a));
    ordered.dedup();
    ordered
}
