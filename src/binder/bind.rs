//! Row ⇄ record conversion driven by a record's column bindings.

use super::SheetRecord;
use crate::types::{Cell, HeaderMap, Result, Row};

/// Bind a data row into a new record.
///
/// Bindings whose column is missing from the header, or past the end of a
/// short row, leave the field at its default.
///
/// # Errors
///
/// Returns `SheetError::Conversion` naming the field whose cell does not
/// parse as the field's kind.
pub fn bind_row<T: SheetRecord>(header: &HeaderMap, row: &Row) -> Result<T> {
    let mut record = T::default();

    for binding in T::schema() {
        let Some(cell) = header.cell(row, binding.column) else {
            continue;
        };
        let value = binding.kind.convert(binding.field, &cell)?;
        record.set_field(binding.field, value)?;
    }

    Ok(record)
}

/// Build a fresh row for appending `record`.
///
/// The row is as wide as the header. Columns without a bound field are
/// left null; fields whose column is not in the header are skipped.
///
/// Cells are written from the typed field, not the text they were bound
/// from, so a round trip through a record normalises text cells: `"TRUE"`
/// comes back as `true` and `"1.50"` as `1.5`.
pub fn record_to_row<T: SheetRecord>(record: &T, header: &HeaderMap) -> Row {
    let mut row = vec![Cell::Null; header.width()];
    write_fields(record, header, &mut row);
    row
}

/// Overlay `record` onto an existing row for an in-place update.
///
/// Cells of unbound columns are kept. The result is resized to the header
/// width.
pub fn overlay_row<T: SheetRecord>(record: &T, header: &HeaderMap, existing: &Row) -> Row {
    let mut row = existing.clone();
    row.resize(header.width(), Cell::Null);
    write_fields(record, header, &mut row);
    row
}

fn write_fields<T: SheetRecord>(record: &T, header: &HeaderMap, row: &mut Row) {
    for binding in T::schema() {
        let Some(index) = header.index_of(binding.column) else {
            continue;
        };
        if let Some(value) = record.get_field(binding.field) {
            row[index] = value.to_cell();
        }
    }
}
