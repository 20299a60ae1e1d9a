//! Tracing instrumentation for sheet operations.
//!
//! Span naming follows the database client conventions:
//! `{operation} {table}`, e.g. `select Users`, `delete Orders`.
//!
//! **Attributes**:
//! - `sheet.operation.name`: select, insert, update, delete
//! - `sheet.table.name`: target sheet
//! - `sheet.query.text`: statement text when the call came from SQL
//! - `sheet.response.returned_rows` / `sheet.response.affected_rows`

pub mod sheet;

pub use sheet::{record_sheet_metrics, sheet_query_span, sheet_span, SheetOperation};
