//! Core types: errors, typed values, rows.

pub mod error;
pub mod row;
pub mod value;

pub use error::{Result, SheetError};
pub use row::{Cell, HeaderMap, Row, Sheet};
pub use value::{parse_bool, render_cell, Value};
