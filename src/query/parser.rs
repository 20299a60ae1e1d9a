//! SQL-subset statement parser.
//!
//! Supports:
//! - `SELECT <cols> FROM <table> [WHERE <cond> (AND <cond>)*] [LIMIT <n>] [OFFSET <n>]`
//! - `INSERT INTO <table> ...`
//! - `UPDATE <table> SET ... [WHERE ...]`
//! - `DELETE FROM <table> [WHERE ...]`
//!
//! Keywords are case-insensitive and whitespace runs are collapsed before
//! matching. Clause keywords inside quoted literals are not keywords, so
//! `WHERE Title = 'no limit here'` is a single condition. The column list of SELECT is accepted and ignored. The VALUES
//! list of INSERT and the SET list of UPDATE are recognized but discarded:
//! writes take their data from a record supplied by the caller.

use super::builder::Query;
use super::predicate::{Operator, Predicate};
use crate::types::{Result, SheetError, Value};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static SELECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^SELECT\s+(.+?)\s+FROM\s+(\w+)(?:\s+WHERE\s+(.+?))?(?:\s+LIMIT\s+(\S+))?(?:\s+OFFSET\s+(\S+))?$",
    )
    .expect("valid regex")
});

static INSERT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^INSERT\s+INTO\s+(\w+)(?:\s*(\(.*)|\s+(.*))?$").expect("valid regex"));

static UPDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^UPDATE\s+(\w+)\s+SET\s+(.+?)(?:\s+WHERE\s+(.+))?$").expect("valid regex")
});

static DELETE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^DELETE\s+FROM\s+(\w+)(?:\s+WHERE\s+(.+))?$").expect("valid regex")
});

static AND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+AND\s+").expect("valid regex"));

static CONDITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\w+)\s*(==|!=|<>|<=|>=|=|<|>|LIKE)\s*(.+)$").expect("valid regex")
});

/// Parsed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Query),
    Insert { table: String },
    Update(Query),
    Delete(Query),
}

impl Statement {
    /// Target table of the statement.
    pub fn table(&self) -> &str {
        match self {
            Statement::Select(q) | Statement::Update(q) | Statement::Delete(q) => q.table(),
            Statement::Insert { table } => table,
        }
    }

    /// Statement keyword, for messages and spans.
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Select(_) => "SELECT",
            Statement::Insert { .. } => "INSERT",
            Statement::Update(_) => "UPDATE",
            Statement::Delete(_) => "DELETE",
        }
    }
}

/// Parse a single statement.
///
/// # Errors
///
/// Returns `SheetError::Syntax` if the statement, a WHERE condition, or a
/// LIMIT/OFFSET literal does not match the grammar.
pub fn parse(sql: &str) -> Result<Statement> {
    let sql = normalize(sql);
    let masked = mask_literals(&sql);
    let text = |caps: &Captures<'_>, i: usize| caps.get(i).map(|m| &sql[m.range()]);

    let statement = if let Some(caps) = SELECT.captures(&masked) {
        let mut query = Query::from_table(&caps[2]);
        if let Some(clause) = text(&caps, 3) {
            query = parse_where(query, clause)?;
        }
        if let Some(limit) = text(&caps, 4) {
            query = query.limit(parse_count("LIMIT", limit)?);
        }
        if let Some(offset) = text(&caps, 5) {
            query = query.offset(parse_count("OFFSET", offset)?);
        }
        Statement::Select(query)
    } else if let Some(caps) = INSERT.captures(&masked) {
        if let Some(rest) = text(&caps, 2).or_else(|| text(&caps, 3)) {
            tracing::debug!(table = &caps[1], discarded = rest, "INSERT literals not applied");
        }
        Statement::Insert {
            table: caps[1].to_string(),
        }
    } else if let Some(caps) = UPDATE.captures(&masked) {
        tracing::debug!(table = &caps[1], discarded = text(&caps, 2).unwrap_or_default(), "UPDATE SET list not applied");
        let mut query = Query::from_table(&caps[1]);
        if let Some(clause) = text(&caps, 3) {
            query = parse_where(query, clause)?;
        }
        Statement::Update(query)
    } else if let Some(caps) = DELETE.captures(&masked) {
        let mut query = Query::from_table(&caps[1]);
        if let Some(clause) = text(&caps, 2) {
            query = parse_where(query, clause)?;
        }
        Statement::Delete(query)
    } else {
        return Err(SheetError::syntax(format!("invalid SQL syntax: {sql}")));
    };

    tracing::debug!(kind = statement.kind(), table = statement.table(), "Parsed statement");
    Ok(statement)
}

/// Parse a SELECT statement into a query.
///
/// # Errors
///
/// Returns `SheetError::Syntax` for malformed text or a non-SELECT statement.
pub fn parse_select(sql: &str) -> Result<Query> {
    match parse(sql)? {
        Statement::Select(query) => Ok(query),
        other => Err(SheetError::syntax(format!(
            "expected SELECT statement, found {}",
            other.kind()
        ))),
    }
}

/// Trim and collapse whitespace runs to a single space.
fn normalize(sql: &str) -> String {
    WHITESPACE.replace_all(sql.trim(), " ").into_owned()
}

/// Replace every character inside a quoted literal with `_`, byte for byte.
///
/// Offsets in the masked text stay valid in the original, and the quotes
/// themselves are kept.
fn mask_literals(sql: &str) -> String {
    let mut masked = String::with_capacity(sql.len());
    let mut open = None;
    for c in sql.chars() {
        match open {
            Some(quote) if c == quote => {
                open = None;
                masked.push(c);
            }
            Some(_) => masked.extend(std::iter::repeat('_').take(c.len_utf8())),
            None => {
                if c == '\'' || c == '"' {
                    open = Some(c);
                }
                masked.push(c);
            }
        }
    }
    masked
}

fn parse_where(mut query: Query, clause: &str) -> Result<Query> {
    let masked = mask_literals(clause);
    let mut start = 0;
    for separator in AND.find_iter(&masked) {
        query = query.and(parse_condition(clause[start..separator.start()].trim())?);
        start = separator.end();
    }
    Ok(query.and(parse_condition(clause[start..].trim())?))
}

fn parse_condition(condition: &str) -> Result<Predicate> {
    let caps = CONDITION
        .captures(condition)
        .ok_or_else(|| SheetError::syntax(format!("invalid WHERE condition: {condition}")))?;

    let operator = Operator::parse(&caps[2]);
    let value = Value::coerce(strip_quotes(caps[3].trim()));

    Ok(Predicate {
        column: caps[1].to_string(),
        operator,
        value,
    })
}

/// Remove one matching pair of surrounding single or double quotes.
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'\'' || first == b'"') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn parse_count(keyword: &str, literal: &str) -> Result<usize> {
    literal
        .parse::<usize>()
        .map_err(|e| SheetError::syntax(format!("invalid {keyword} value '{literal}': {e}")))
}
