//! sheetsql - SQL-subset query layer over tabular sheets
//!
//! Treats named sheets of rows and columns as tables:
//! - Statement parser for single-table SELECT/INSERT/UPDATE/DELETE
//! - Fluent builder producing the same query model
//! - Predicate evaluation with numeric-first ordering comparisons
//! - Typed record binding through declared column bindings
//!
//! Row storage is pluggable through [`SheetStore`]; in-memory and CSV
//! directory stores are included.

pub mod binder;
pub mod client;
pub mod config;
pub mod otel;
pub mod query;
pub mod store;
pub mod types;

// Re-export main types
pub use binder::{ColumnBinding, FieldKind, SheetField, SheetRecord};
pub use client::{Outcome, Sheets};
pub use config::Config;
pub use query::{parse, parse_select, Operator, Predicate, Query, Statement};
pub use store::{CsvStore, MemoryStore, SheetStore};
pub use types::{render_cell, Cell, HeaderMap, Result, Row, Sheet, SheetError, Value};
