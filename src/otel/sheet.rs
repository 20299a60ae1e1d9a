//! Sheet operation instrumentation.

use tracing::{field, span, Level, Span};

/// Sheet operation types (maps to `sheet.operation.name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetOperation {
    /// Filtered read
    Select,
    /// Row append
    Insert,
    /// In-place row overwrite
    Update,
    /// Row removal
    Delete,
}

impl SheetOperation {
    /// Get operation name as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Create a span for one operation on `table`.
///
/// # Example
///
/// ```rust,ignore
/// let span = sheet_span(SheetOperation::Select, "Users");
/// let _guard = span.enter();
/// ```
pub fn sheet_span(operation: SheetOperation, table: &str) -> Span {
    span!(
        Level::INFO,
        "sheet",
        otel.name = %format_args!("{} {}", operation.as_str(), table),
        otel.kind = "client",
        sheet.operation.name = operation.as_str(),
        sheet.table.name = table,
        sheet.query.text = field::Empty,
        sheet.response.returned_rows = field::Empty,
        sheet.response.affected_rows = field::Empty,
    )
}

/// Create a span for a statement given as SQL text.
pub fn sheet_query_span(operation: SheetOperation, table: &str, query_text: &str) -> Span {
    let span = sheet_span(operation, table);
    span.record("sheet.query.text", query_text);
    span
}

/// Record row counts in the current span.
pub fn record_sheet_metrics(rows_returned: Option<usize>, rows_affected: Option<usize>) {
    let span = Span::current();
    if let Some(returned) = rows_returned {
        span.record("sheet.response.returned_rows", returned);
    }
    if let Some(affected) = rows_affected {
        span.record("sheet.response.affected_rows", affected);
    }
}
