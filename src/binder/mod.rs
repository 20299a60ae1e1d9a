//! Record binding between sheet rows and typed records.
//!
//! A record type describes itself with an ordered list of
//! [`ColumnBinding`]s (field identifier, column name, kind). The binder
//! walks that list in both directions:
//!
//! - read: row → record, converting each bound cell per the field kind
//! - write: record → row, placing each bound field at its header index
//!
//! The [`sheet_record!`](crate::sheet_record) macro declares a struct and
//! its bindings in one place:
//!
//! ```rust
//! use sheetsql::sheet_record;
//!
//! sheet_record! {
//!     #[derive(Debug, Clone, Default, PartialEq)]
//!     pub struct User {
//!         #[column = "ID"]
//!         pub id: i64,
//!         #[column = "Name"]
//!         pub name: String,
//!         pub email: String,
//!     }
//! }
//! ```
//!
//! `email` binds to a column literally named `email`.

pub mod bind;
pub mod dynamic;

pub use bind::{bind_row, overlay_row, record_to_row};
pub use dynamic::{map_to_row, row_to_map};

use crate::types::{parse_bool, Result, SheetError, Value};
use std::fmt;

/// Declared kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    Boolean,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
        }
    }

    /// Convert rendered cell text into a value of this kind.
    ///
    /// Empty text yields the zero value for numeric and boolean kinds.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Conversion` naming `field` when the text does
    /// not parse.
    pub fn convert(&self, field: &str, raw: &str) -> Result<Value> {
        match self {
            Self::Text => Ok(Value::String(raw.to_string())),
            Self::Integer if raw.is_empty() => Ok(Value::Integer(0)),
            Self::Float if raw.is_empty() => Ok(Value::Float(0.0)),
            Self::Boolean if raw.is_empty() => Ok(Value::Boolean(false)),
            Self::Integer => raw
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|e| SheetError::conversion(field, raw, e.to_string())),
            Self::Float => raw
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| SheetError::conversion(field, raw, e.to_string())),
            Self::Boolean => parse_bool(raw)
                .map(Value::Boolean)
                .ok_or_else(|| SheetError::conversion(field, raw, "invalid boolean literal")),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binding of one record field to a sheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnBinding {
    /// Field identifier on the record
    pub field: &'static str,
    /// Header name of the bound column
    pub column: &'static str,
    /// Conversion applied when reading the cell
    pub kind: FieldKind,
}

/// Scalar type usable as a record field.
pub trait SheetField: Sized {
    const KIND: FieldKind;

    /// Extract from a value of the matching kind.
    fn from_value(value: &Value) -> Option<Self>;

    fn to_value(&self) -> Value;
}

impl SheetField for String {
    const KIND: FieldKind = FieldKind::Text;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl SheetField for i64 {
    const KIND: FieldKind = FieldKind::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Integer(*self)
    }
}

impl SheetField for i32 {
    const KIND: FieldKind = FieldKind::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => i32::try_from(*i).ok(),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Integer((*self).into())
    }
}

impl SheetField for u32 {
    const KIND: FieldKind = FieldKind::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => u32::try_from(*i).ok(),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Integer((*self).into())
    }
}

impl SheetField for f64 {
    const KIND: FieldKind = FieldKind::Float;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl SheetField for f32 {
    const KIND: FieldKind = FieldKind::Float;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f as f32),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Float((*self).into())
    }
}

impl SheetField for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

/// Typed record bound to sheet columns.
///
/// Usually implemented through [`sheet_record!`](crate::sheet_record).
/// Fields not present in a row keep their `Default` value.
pub trait SheetRecord: Default {
    /// Field bindings in declaration order.
    fn schema() -> &'static [ColumnBinding];

    /// Current value of `field`, or `None` for an unknown field.
    fn get_field(&self, field: &str) -> Option<Value>;

    /// Assign `field` from a converted value.
    ///
    /// # Errors
    ///
    /// Returns `SheetError::Conversion` for an unknown field or a value the
    /// field type cannot hold.
    fn set_field(&mut self, field: &str, value: Value) -> Result<()>;
}

/// Convert `value` into field type `T`, naming `field` on failure.
pub fn field_from_value<T: SheetField>(field: &str, value: &Value) -> Result<T> {
    T::from_value(value).ok_or_else(|| {
        SheetError::conversion(
            field,
            value.to_string(),
            format!("unsupported value for {} field", T::KIND),
        )
    })
}

/// Declare a struct together with its [`SheetRecord`] bindings.
///
/// Fields take an optional `#[column = "Header"]` annotation; without one
/// the field identifier is the column name. The struct must implement
/// `Default`.
#[macro_export]
macro_rules! sheet_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[column = $column:literal])?
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $field_vis $field: $ty, )*
        }

        impl $crate::binder::SheetRecord for $name {
            fn schema() -> &'static [$crate::binder::ColumnBinding] {
                const SCHEMA: &[$crate::binder::ColumnBinding] = &[
                    $(
                        $crate::binder::ColumnBinding {
                            field: stringify!($field),
                            column: $crate::__sheet_column!($field $(, $column)?),
                            kind: <$ty as $crate::binder::SheetField>::KIND,
                        },
                    )*
                ];
                SCHEMA
            }

            fn get_field(&self, field: &str) -> Option<$crate::Value> {
                $(
                    if field == stringify!($field) {
                        return Some($crate::binder::SheetField::to_value(&self.$field));
                    }
                )*
                None
            }

            fn set_field(&mut self, field: &str, value: $crate::Value) -> $crate::Result<()> {
                $(
                    if field == stringify!($field) {
                        self.$field = $crate::binder::field_from_value::<$ty>(field, &value)?;
                        return Ok(());
                    }
                )*
                Err($crate::SheetError::conversion(field, value.to_string(), "unknown field"))
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sheet_column {
    ($field:ident, $column:literal) => {
        $column
    };
    ($field:ident) => {
        stringify!($field)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::sheet_record! {
        #[derive(Debug, Default, PartialEq)]
        struct Product {
            #[column = "SKU"]
            sku: String,
            price: f64,
            #[column = "In Stock"]
            in_stock: bool,
            count: u32,
        }
    }

    #[test]
    fn test_macro_schema() {
        let schema = Product::schema();

        assert_eq!(schema.len(), 4);
        assert_eq!(
            schema[0],
            ColumnBinding { field: "sku", column: "SKU", kind: FieldKind::Text }
        );
        assert_eq!(schema[1].column, "price");
        assert_eq!(schema[2].column, "In Stock");
        assert_eq!(schema[3].kind, FieldKind::Integer);
    }

    #[test]
    fn test_get_and_set_field() {
        let mut product = Product::default();
        product.set_field("price", Value::Float(2.5)).unwrap();
        product.set_field("in_stock", Value::Boolean(true)).unwrap();

        assert_eq!(product.get_field("price"), Some(Value::Float(2.5)));
        assert_eq!(product.get_field("in_stock"), Some(Value::Boolean(true)));
        assert_eq!(product.get_field("nope"), None);
    }

    #[test]
    fn test_set_field_rejects_wrong_kind() {
        let mut product = Product::default();

        let err = product.set_field("price", Value::from("cheap")).unwrap_err();
        assert!(matches!(err, SheetError::Conversion { ref field, .. } if field == "price"));

        let err = product.set_field("count", Value::Integer(-1)).unwrap_err();
        assert!(matches!(err, SheetError::Conversion { .. }));

        let err = product.set_field("color", Value::from("red")).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_kind_convert() {
        assert_eq!(FieldKind::Integer.convert("Age", "").unwrap(), Value::Integer(0));
        assert_eq!(FieldKind::Integer.convert("Age", "42").unwrap(), Value::Integer(42));
        assert_eq!(FieldKind::Float.convert("Price", "").unwrap(), Value::Float(0.0));
        assert_eq!(FieldKind::Boolean.convert("Active", "TRUE").unwrap(), Value::Boolean(true));
        assert_eq!(FieldKind::Text.convert("Name", "").unwrap(), Value::from(""));

        let err = FieldKind::Integer.convert("Age", "thirty").unwrap_err();
        assert!(err.to_string().contains("'Age'"));
        assert!(FieldKind::Boolean.convert("Active", "yes").is_err());
    }
}
