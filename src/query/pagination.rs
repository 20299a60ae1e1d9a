//! Offset/limit scan over data rows.
//!
//! A single pass in source order:
//! 1. Rows failing the predicates are skipped without touching offset or limit
//! 2. A matching row whose position in the unfiltered data rows is below
//!    `offset` is skipped
//! 3. Once `limit` results are collected the scan stops
//!
//! Offset counts row positions, not prior matches. With matches at
//! positions 0, 2, 4 and `offset = 1`, only position 0 is dropped.

use super::builder::Query;
use crate::types::{HeaderMap, Row};

/// Matched row with its zero-based position among the data rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'r> {
    pub index: usize,
    pub row: &'r Row,
}

/// Run the scan for `query` over `rows`.
pub fn scan<'r>(query: &Query, header: &HeaderMap, rows: &'r [Row]) -> Vec<Match<'r>> {
    let limit = query.limit_value();
    let offset = query.offset_value();
    let mut results = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        if !query.matches(header, row) {
            continue;
        }
        if index < offset {
            continue;
        }
        if limit > 0 && results.len() >= limit {
            break;
        }
        results.push(Match { index, row });
    }

    tracing::debug!(
        scanned = rows.len(),
        returned = results.len(),
        limit,
        offset,
        "Scanned sheet rows"
    );

    results
}

/// Positions of every data row matching `query`, ignoring limit and offset.
///
/// Used by updates and deletes, which apply to all matches.
pub fn matching_indexes(query: &Query, header: &HeaderMap, rows: &[Row]) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| query.matches(header, row))
        .map(|(index, _)| index)
        .collect()
}
