//! Typed predicate values and cell rendering.
//!
//! Cells fetched from a sheet are untyped. Comparisons happen on rendered
//! strings, so every `Value` and every cell has exactly one string form.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Typed value carried by a predicate or produced by coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
}

impl Value {
    /// Coerce raw text into a typed value.
    ///
    /// Tried in order, first success wins: integer, float, boolean, string.
    /// Only finite floats count, so words like `Nan` or `Inf` stay strings.
    /// Never fails.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sheetsql::Value;
    ///
    /// assert_eq!(Value::coerce("18"), Value::Integer(18));
    /// assert_eq!(Value::coerce("19.99"), Value::Float(19.99));
    /// assert_eq!(Value::coerce("true"), Value::Boolean(true));
    /// assert_eq!(Value::coerce("New York"), Value::String("New York".into()));
    /// ```
    pub fn coerce(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            Value::Integer(i)
        } else if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
            Value::Float(f)
        } else if let Some(b) = parse_bool(raw) {
            Value::Boolean(b)
        } else {
            Value::String(raw.to_string())
        }
    }

    /// Convert into a sheet cell for write-back.
    pub fn to_cell(&self) -> serde_json::Value {
        match self {
            Value::Integer(i) => serde_json::Value::from(*i),
            // Non-finite floats have no JSON number form
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::String(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

/// Parse a boolean literal.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
/// counterparts. Sheets commonly render booleans as `TRUE`/`FALSE`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Render a cell to the string form used for comparison and binding.
///
/// Null renders empty; integral numbers render without a fraction and
/// other numbers in shortest float form, so `20.0` renders `20`.
pub fn render_cell(cell: &serde_json::Value) -> Cow<'_, str> {
    match cell {
        serde_json::Value::String(s) => Cow::Borrowed(s.as_str()),
        serde_json::Value::Null => Cow::Borrowed(""),
        serde_json::Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cow::Owned(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Cow::Owned(u.to_string())
            } else {
                Cow::Owned(n.as_f64().map(|f| f.to_string()).unwrap_or_default())
            }
        }
        other => Cow::Owned(other.to_string()),
    }
}
