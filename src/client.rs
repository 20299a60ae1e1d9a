//! Query executor over a sheet store.
//!
//! [`Sheets`] fetches a fresh sheet per call, runs the query layer over it,
//! and binds or writes rows through the store. Nothing is cached between
//! calls, so two calls can observe different sheet contents.
//!
//! # Example
//!
//! ```rust
//! use sheetsql::{sheet_record, MemoryStore, Query, Sheets};
//! use serde_json::json;
//!
//! sheet_record! {
//!     #[derive(Debug, Default)]
//!     pub struct User {
//!         #[column = "Name"]
//!         pub name: String,
//!         #[column = "Age"]
//!         pub age: i64,
//!     }
//! }
//!
//! let mut store = MemoryStore::new();
//! store.add_values("Users", vec![
//!     vec![json!("Name"), json!("Age")],
//!     vec![json!("John"), json!(30)],
//!     vec![json!("Jane"), json!(17)],
//! ]);
//! let sheets = Sheets::new(store);
//!
//! let adults: Vec<User> = sheets.select(&Query::from_table("Users").filter("Age", ">", 18)).unwrap();
//! assert_eq!(adults.len(), 1);
//!
//! let same: Vec<User> = sheets.query("SELECT * FROM Users WHERE Age > 18").unwrap();
//! assert_eq!(same[0].name, "John");
//! ```

use crate::binder::{bind_row, map_to_row, overlay_row, record_to_row, row_to_map, SheetRecord};
use crate::otel::{record_sheet_metrics, sheet_query_span, sheet_span, SheetOperation};
use crate::query::{matching_indexes, parse, parse_select, Query, Statement};
use crate::store::SheetStore;
use crate::types::{Cell, HeaderMap, Result, Row, Sheet, SheetError};
use serde_json::Map;

/// Result of [`Sheets::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Rows returned by a SELECT
    Rows(Vec<Row>),
    /// Rows removed by a DELETE
    Affected(usize),
}

/// Executor binding the query layer to a store.
#[derive(Debug, Clone)]
pub struct Sheets<S> {
    store: S,
}

impl<S: SheetStore> Sheets<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Matching rows after offset and limit.
    pub fn select_rows(&self, query: &Query) -> Result<Vec<Row>> {
        let span = sheet_span(SheetOperation::Select, query.table());
        let _guard = span.enter();
        self.run_select(query, |_, row| Ok(row.clone()))
    }

    /// Matching rows bound into records.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Conversion` if any returned row fails to bind.
    pub fn select<T: SheetRecord>(&self, query: &Query) -> Result<Vec<T>> {
        let span = sheet_span(SheetOperation::Select, query.table());
        let _guard = span.enter();
        self.run_select(query, bind_row::<T>)
    }

    /// Matching rows as JSON objects keyed by header name.
    pub fn select_maps(&self, query: &Query) -> Result<Vec<Map<String, Cell>>> {
        let span = sheet_span(SheetOperation::Select, query.table());
        let _guard = span.enter();
        self.run_select(query, |header, row| Ok(row_to_map(header, row)))
    }

    /// Append `record` as a new row.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::EmptySheet` when the sheet has no header row.
    pub fn insert<T: SheetRecord>(&mut self, table: &str, record: &T) -> Result<()> {
        let span = sheet_span(SheetOperation::Insert, table);
        let _guard = span.enter();
        self.run_insert(table, |header| record_to_row(record, header))
    }

    /// Append a row built from a JSON object keyed by header name.
    pub fn insert_map(&mut self, table: &str, map: &Map<String, Cell>) -> Result<()> {
        let span = sheet_span(SheetOperation::Insert, table);
        let _guard = span.enter();
        self.run_insert(table, |header| map_to_row(map, header))
    }

    /// Overwrite every matching row with the bound fields of `record`.
    ///
    /// Limit and offset are ignored. Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::NoMatch` if nothing matched. Rows are written
    /// one at a time; when a write fails, rows already written stay written.
    pub fn update<T: SheetRecord>(&mut self, query: &Query, record: &T) -> Result<usize> {
        let span = sheet_span(SheetOperation::Update, query.table());
        let _guard = span.enter();
        self.run_update(query, record)
    }

    /// Remove every matching row. Limit and offset are ignored.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::NoMatch` if nothing matched.
    pub fn delete(&mut self, query: &Query) -> Result<usize> {
        let span = sheet_span(SheetOperation::Delete, query.table());
        let _guard = span.enter();
        self.run_delete(query)
    }

    /// Run a SELECT statement and bind the rows into records.
    pub fn query<T: SheetRecord>(&self, sql: &str) -> Result<Vec<T>> {
        let query = parse_select(sql)?;
        let span = sheet_query_span(SheetOperation::Select, query.table(), sql);
        let _guard = span.enter();
        self.run_select(&query, bind_row::<T>)
    }

    /// Run a SELECT statement and return raw rows.
    pub fn query_rows(&self, sql: &str) -> Result<Vec<Row>> {
        let query = parse_select(sql)?;
        let span = sheet_query_span(SheetOperation::Select, query.table(), sql);
        let _guard = span.enter();
        self.run_select(&query, |_, row| Ok(row.clone()))
    }

    /// Run an INSERT statement with data taken from `record`.
    ///
    /// Only the table name is read from the statement; a VALUES list is
    /// ignored.
    pub fn insert_sql<T: SheetRecord>(&mut self, sql: &str, record: &T) -> Result<()> {
        match parse(sql)? {
            Statement::Insert { table } => {
                let span = sheet_query_span(SheetOperation::Insert, &table, sql);
                let _guard = span.enter();
                self.run_insert(&table, |header| record_to_row(record, header))
            }
            other => Err(wrong_statement("INSERT", &other)),
        }
    }

    /// Run an UPDATE statement with data taken from `record`.
    ///
    /// The WHERE clause selects rows; the SET list is ignored.
    pub fn update_sql<T: SheetRecord>(&mut self, sql: &str, record: &T) -> Result<usize> {
        match parse(sql)? {
            Statement::Update(query) => {
                let span = sheet_query_span(SheetOperation::Update, query.table(), sql);
                let _guard = span.enter();
                self.run_update(&query, record)
            }
            other => Err(wrong_statement("UPDATE", &other)),
        }
    }

    /// Run a DELETE statement.
    pub fn delete_sql(&mut self, sql: &str) -> Result<usize> {
        match parse(sql)? {
            Statement::Delete(query) => {
                let span = sheet_query_span(SheetOperation::Delete, query.table(), sql);
                let _guard = span.enter();
                self.run_delete(&query)
            }
            other => Err(wrong_statement("DELETE", &other)),
        }
    }

    /// Run any statement that needs no record.
    ///
    /// # Errors
    ///
    /// INSERT and UPDATE return `SheetError::NotImplemented`: their literal
    /// VALUES/SET lists are never applied, use [`Self::insert_sql`] or
    /// [`Self::update_sql`] with a record instead.
    pub fn execute(&mut self, sql: &str) -> Result<Outcome> {
        match parse(sql)? {
            Statement::Select(query) => {
                let span = sheet_query_span(SheetOperation::Select, query.table(), sql);
                let _guard = span.enter();
                self.run_select(&query, |_, row| Ok(row.clone()))
                    .map(Outcome::Rows)
            }
            Statement::Delete(query) => {
                let span = sheet_query_span(SheetOperation::Delete, query.table(), sql);
                let _guard = span.enter();
                self.run_delete(&query).map(Outcome::Affected)
            }
            other => Err(SheetError::NotImplemented(format!(
                "{} literals are not applied; supply a record",
                other.kind()
            ))),
        }
    }

    fn run_select<R>(
        &self,
        query: &Query,
        mut bind: impl FnMut(&HeaderMap, &Row) -> Result<R>,
    ) -> Result<Vec<R>> {
        let sheet = self.store.fetch_rows(query.table())?;
        if sheet.header.is_empty() {
            record_sheet_metrics(Some(0), None);
            return Ok(Vec::new());
        }

        let header = sheet.header_map();
        let results = query
            .execute(&header, &sheet.rows)
            .into_iter()
            .map(|m| bind(&header, m.row))
            .collect::<Result<Vec<_>>>()?;

        record_sheet_metrics(Some(results.len()), None);
        Ok(results)
    }

    fn run_insert(&mut self, table: &str, build: impl FnOnce(&HeaderMap) -> Row) -> Result<()> {
        let sheet = self.fetch_with_header(table)?;
        let row = build(&sheet.header_map());
        self.store.append_row(table, row)?;
        record_sheet_metrics(None, Some(1));
        Ok(())
    }

    fn run_update<T: SheetRecord>(&mut self, query: &Query, record: &T) -> Result<usize> {
        let table = query.table();
        let sheet = self.fetch_with_header(table)?;
        let header = sheet.header_map();

        let indexes = matching_indexes(query, &header, &sheet.rows);
        if indexes.is_empty() {
            return Err(SheetError::NoMatch {
                table: table.to_string(),
            });
        }

        for (written, &index) in indexes.iter().enumerate() {
            let row = overlay_row(record, &header, &sheet.rows[index]);
            if let Err(err) = self.store.update_row(table, index, row) {
                tracing::warn!(
                    table,
                    row = index,
                    written,
                    remaining = indexes.len() - written,
                    error = %err,
                    "Update stopped after partial write"
                );
                return Err(err);
            }
        }

        record_sheet_metrics(None, Some(indexes.len()));
        Ok(indexes.len())
    }

    fn run_delete(&mut self, query: &Query) -> Result<usize> {
        let table = query.table();
        let sheet = self.fetch_with_header(table)?;
        let header = sheet.header_map();

        let mut indexes = matching_indexes(query, &header, &sheet.rows);
        if indexes.is_empty() {
            return Err(SheetError::NoMatch {
                table: table.to_string(),
            });
        }
        indexes.reverse();

        let table_id = self.store.resolve_table_id(table)?;
        tracing::debug!(table, table_id = %table_id, rows = indexes.len(), "Deleting rows");
        self.store.delete_rows(&table_id, &indexes)?;

        record_sheet_metrics(None, Some(indexes.len()));
        Ok(indexes.len())
    }

    fn fetch_with_header(&self, table: &str) -> Result<Sheet> {
        let sheet = self.store.fetch_rows(table)?;
        if sheet.header.is_empty() {
            return Err(SheetError::EmptySheet(table.to_string()));
        }
        Ok(sheet)
    }
}

fn wrong_statement(expected: &str, found: &Statement) -> SheetError {
    SheetError::syntax(format!(
        "expected {} statement, found {}",
        expected,
        found.kind()
    ))
}
