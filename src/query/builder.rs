//! Query model and fluent builder.
//!
//! ```rust
//! use sheetsql::Query;
//!
//! let query = Query::from_table("Users")
//!     .filter("Age", ">", 18)
//!     .filter("Name", "LIKE", "John")
//!     .limit(10);
//!
//! assert_eq!(query.predicates().len(), 2);
//! ```
//!
//! Every builder call consumes the query and returns it, so a query has a
//! single owner while it is being built. Build one query per request.

use super::pagination::{scan, Match};
use super::predicate::{matches_all, Operator, Predicate};
use crate::types::{HeaderMap, Row, Value};
use serde::{Deserialize, Serialize};

/// Canonical query: table, AND-list of predicates, limit, offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    table: String,
    predicates: Vec<Predicate>,
    limit: usize,
    offset: usize,
}

impl Query {
    /// Start a query on `table` with no predicates and no bounds.
    pub fn from_table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Append a `column operator value` predicate (WHERE ... AND ...).
    ///
    /// The operator is not validated here. Unknown operator text simply
    /// never matches during evaluation.
    pub fn filter(
        mut self,
        column: impl Into<String>,
        operator: impl Into<Operator>,
        value: impl Into<Value>,
    ) -> Self {
        self.predicates.push(Predicate::new(column, operator, value));
        self
    }

    /// Append an already built predicate.
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Cap the number of returned rows. `0` means unbounded.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Skip data rows whose position is below `offset`. `0` means none.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn limit_value(&self) -> usize {
        self.limit
    }

    pub fn offset_value(&self) -> usize {
        self.offset
    }

    /// Check if a row satisfies every predicate.
    pub fn matches(&self, header: &HeaderMap, row: &Row) -> bool {
        matches_all(&self.predicates, header, row)
    }

    /// Filter and paginate data rows (header excluded).
    pub fn execute<'r>(&self, header: &HeaderMap, rows: &'r [Row]) -> Vec<Match<'r>> {
        scan(self, header, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let query = Query::from_table("Users")
            .filter("Age", ">", 18)
            .filter("Name", "LIKE", "John")
            .limit(10)
            .offset(2);

        assert_eq!(query.table(), "Users");
        assert_eq!(query.limit_value(), 10);
        assert_eq!(query.offset_value(), 2);
        assert_eq!(
            query.predicates(),
            &[
                Predicate::new("Age", Operator::Gt, Value::Integer(18)),
                Predicate::new("Name", Operator::Like, Value::from("John")),
            ]
        );
    }

    #[test]
    fn test_filter_appends_without_dedup() {
        let query = Query::from_table("Users")
            .filter("Age", ">", 18)
            .filter("Age", ">", 18)
            .filter("Age", "bogus", 1);

        assert_eq!(query.predicates().len(), 3);
        assert_eq!(query.predicates()[2].operator, Operator::Unknown("bogus".into()));
    }

    #[test]
    fn test_defaults_unbounded() {
        let query = Query::from_table("Users");
        assert!(query.predicates().is_empty());
        assert_eq!(query.limit_value(), 0);
        assert_eq!(query.offset_value(), 0);
    }
}
