//! Dynamic row and bind-value types.
//!
//! Rows travel as [`Record`]s (column name -> JSON value). Values headed for
//! the database travel as [`SqlValue`]s, which know how to bind themselves to
//! a PostgreSQL argument list.

use folio_core::types::{Date, DbId, Timestamp};
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

/// A single row: column name to value.
pub type Record = serde_json::Map<String, Value>;

/// Typed bind value for dynamically-built statements.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(Date),
    Timestamp(Timestamp),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Adjust the representation so that an explicit cast to `sql_type` is
    /// valid in PostgreSQL.
    ///
    /// `bigint` has no cast to `boolean` and `boolean` has no cast to `bigint`,
    /// so callers sending `1`/`0` for flags (or `true` for counters) are
    /// converted here. Everything else is left to the server-side cast.
    pub fn coerce_to(self, sql_type: &str) -> SqlValue {
        match (sql_type, self) {
            ("boolean", SqlValue::Int(n)) => SqlValue::Bool(n != 0),
            ("boolean", SqlValue::Float(f)) => SqlValue::Bool(f != 0.0),
            ("smallint" | "integer" | "bigint", SqlValue::Bool(b)) => SqlValue::Int(i64::from(b)),
            (_, value) => value,
        }
    }

    pub(crate) fn add_to(&self, args: &mut PgArguments) -> Result<(), sqlx::error::BoxDynError> {
        match self {
            SqlValue::Null => args.add(None::<String>),
            SqlValue::Bool(v) => args.add(*v),
            SqlValue::Int(v) => args.add(*v),
            SqlValue::Float(v) => args.add(*v),
            SqlValue::Text(v) => args.add(v.clone()),
            SqlValue::Date(v) => args.add(*v),
            SqlValue::Timestamp(v) => args.add(*v),
        }
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(i64::from(v))
    }
}

impl From<DbId> for SqlValue {
    fn from(v: DbId) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<Date> for SqlValue {
    fn from(v: Date) -> Self {
        SqlValue::Date(v)
    }
}

impl From<Timestamp> for SqlValue {
    fn from(v: Timestamp) -> Self {
        SqlValue::Timestamp(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// Caller JSON to bind value.
///
/// Arrays and objects are serialized to JSON text; this is the write side of
/// the JSON-in-text-column boundary (see [`crate::json_column`]).
impl From<&Value> for SqlValue {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => SqlValue::Null,
            Value::Bool(b) => SqlValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => SqlValue::Int(i),
                None => SqlValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => SqlValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => SqlValue::Text(v.to_string()),
        }
    }
}
