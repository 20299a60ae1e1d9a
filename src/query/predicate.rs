//! Predicate model and row evaluation.
//!
//! Predicates compare the rendered string form of a cell against the
//! rendered string form of a typed value. Only the ordering operators look
//! at numbers, and only when both sides parse as floats.

use crate::types::{HeaderMap, Row, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Comparison operator of a predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `=` or `==`
    Eq,
    /// `!=` or `<>`
    Ne,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// Case-insensitive substring containment
    Like,
    /// Operator text the evaluator does not know; never matches
    Unknown(String),
}

impl Operator {
    /// Parse operator text. Unrecognized text yields `Operator::Unknown`.
    pub fn parse(op: &str) -> Self {
        match op {
            "=" | "==" => Operator::Eq,
            "!=" | "<>" => Operator::Ne,
            ">" => Operator::Gt,
            "<" => Operator::Lt,
            ">=" => Operator::Ge,
            "<=" => Operator::Le,
            _ if op.eq_ignore_ascii_case("like") => Operator::Like,
            _ => Operator::Unknown(op.to_string()),
        }
    }

    /// Canonical operator text.
    pub fn as_str(&self) -> &str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Like => "LIKE",
            Operator::Unknown(op) => op,
        }
    }

    fn is_ordering(&self) -> bool {
        matches!(self, Operator::Gt | Operator::Lt | Operator::Ge | Operator::Le)
    }
}

impl From<&str> for Operator {
    fn from(op: &str) -> Self {
        Operator::parse(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single `column operator value` filter condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub column: String,
    pub operator: Operator,
    pub value: Value,
}

impl Predicate {
    /// Create a predicate.
    pub fn new(column: impl Into<String>, operator: impl Into<Operator>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Evaluate against one row.
    ///
    /// A column absent from the header, or past the end of a short row, is
    /// vacuously satisfied.
    pub fn evaluate(&self, header: &HeaderMap, row: &Row) -> bool {
        let Some(cell) = header.cell(row, &self.column) else {
            return true;
        };
        let expected = self.value.to_string();

        match &self.operator {
            Operator::Eq => cell == expected.as_str(),
            Operator::Ne => cell != expected.as_str(),
            Operator::Like => cell.to_lowercase().contains(&expected.to_lowercase()),
            op @ (Operator::Gt | Operator::Lt | Operator::Ge | Operator::Le) => {
                compare_ordered(&cell, &expected, op)
            }
            Operator::Unknown(_) => false,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.operator, self.value)
    }
}

/// True when every predicate holds for `row` (AND).
pub fn matches_all(predicates: &[Predicate], header: &HeaderMap, row: &Row) -> bool {
    predicates.iter().all(|p| p.evaluate(header, row))
}

/// Apply an ordering operator to two rendered values.
///
/// Numeric when both sides parse as floats, lexicographic otherwise.
/// Non-ordering operators return `false`.
///
/// # Example
///
/// ```rust
/// use sheetsql::query::{compare_ordered, Operator};
///
/// assert!(!compare_ordered("9", "10", &Operator::Gt));
/// assert!(compare_ordered("b", "a", &Operator::Gt));
/// ```
pub fn compare_ordered(left: &str, right: &str, op: &Operator) -> bool {
    if !op.is_ordering() {
        return false;
    }

    let ordering = match (left.parse::<f64>(), right.parse::<f64>()) {
        (Ok(l), Ok(r)) => match l.partial_cmp(&r) {
            Some(ordering) => ordering,
            // NaN on either side: every comparison is false
            None => return false,
        },
        _ => left.cmp(right),
    };

    match op {
        Operator::Gt => ordering == Ordering::Greater,
        Operator::Lt => ordering == Ordering::Less,
        Operator::Ge => ordering != Ordering::Less,
        Operator::Le => ordering != Ordering::Greater,
        _ => false,
    }
}
