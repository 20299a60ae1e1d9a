//! Query layer: predicate model, fluent builder, statement parser, scan.
//!
//! A text statement and a builder chain produce the same `Query`:
//!
//! ```rust
//! use sheetsql::query::{parse_select, Query};
//!
//! let parsed = parse_select("SELECT * FROM Users WHERE Age > 18 LIMIT 10").unwrap();
//! let built = Query::from_table("Users").filter("Age", ">", 18).limit(10);
//! assert_eq!(parsed, built);
//! ```

pub mod builder;
pub mod pagination;
pub mod parser;
pub mod predicate;

pub use builder::Query;
pub use pagination::{matching_indexes, scan, Match};
pub use parser::{parse, parse_select, Statement};
pub use predicate::{compare_ordered, matches_all, Operator, Predicate};
