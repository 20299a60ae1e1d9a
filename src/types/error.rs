//! Error types for sheet query operations.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `From` implementations.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SheetError>;

/// Error type for parsing, binding, and executing sheet queries.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Statement, WHERE condition, or numeric literal did not match the grammar
    #[error("SQL syntax error: {0}")]
    Syntax(String),

    /// A cell could not be coerced into a record field
    #[error("Cannot convert {value:?} for field '{field}': {reason}")]
    Conversion {
        field: String,
        value: String,
        reason: String,
    },

    /// A write statement's WHERE clause matched zero rows
    #[error("No rows matched the where conditions in sheet '{table}'")]
    NoMatch { table: String },

    /// Feature recognized by the grammar but not applied
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Sheet unknown to the store
    #[error("Sheet not found: {0}")]
    TableNotFound(String),

    /// Sheet has no header row
    #[error("No headers found in sheet '{0}'")]
    EmptySheet(String),

    /// Row index past the end of the sheet
    #[error("Row {index} out of range in sheet '{table}'")]
    RowOutOfRange { table: String, index: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SheetError {
    /// Create a syntax error with context.
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }

    /// Create a conversion error for `field`.
    ///
    /// # Arguments
    ///
    /// * `field` - Record field identifier
    /// * `value` - Offending cell text
    /// * `reason` - Why the conversion failed
    pub fn conversion(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error came from the statement grammar.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax(_))
    }
}
