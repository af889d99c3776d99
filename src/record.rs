use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::sqlite::Value;

/// Textual layout of `CURRENT_TIMESTAMP` in SQLite.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One fetched row: column name to value, tagged with its table.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub table: String,
    pub values: HashMap<String, Value>,
}

impl Record {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            values: HashMap::new(),
        }
    }

    pub fn with_value(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.values.insert(column.to_string(), value.into());
        self
    }

    pub fn value(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Typed read of a column.
    pub fn get<T: FromValue>(&self, column: &str) -> Result<T> {
        let value = self.values.get(column).ok_or_else(|| Error::MissingColumn {
            table: self.table.clone(),
            column: column.to_string(),
        })?;
        T::from_value(column, value)
    }
}

/// Conversion out of a stored [`Value`].
pub trait FromValue: Sized {
    fn from_value(column: &str, value: &Value) -> Result<Self>;
}

fn mismatch<T>(column: &str, expected: &'static str, found: &Value) -> Result<T> {
    Err(Error::TypeMismatch {
        column: column.to_string(),
        expected,
        found: found.kind(),
    })
}

impl FromValue for i64 {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Integer(v) => Ok(*v),
            Value::Boolean(b) => Ok(i64::from(*b)),
            other => mismatch(column, "integer", other),
        }
    }
}

impl FromValue for i32 {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        let wide = i64::from_value(column, value)?;
        i32::try_from(wide).map_err(|err| Error::InvalidValue {
            column: column.to_string(),
            reason: err.to_string(),
        })
    }
}

impl FromValue for f64 {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Real(v) => Ok(*v),
            Value::Integer(v) => Ok(*v as f64),
            other => mismatch(column, "real", other),
        }
    }
}

impl FromValue for bool {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Boolean(b) => Ok(*b),
            Value::Integer(v) => Ok(*v != 0),
            other => mismatch(column, "boolean", other),
        }
    }
}

impl FromValue for String {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Text(v) => Ok(v.clone()),
            other => mismatch(column, "text", other),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Blob(v) => Ok(v.clone()),
            other => mismatch(column, "blob", other),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Timestamp(t) => Ok(*t),
            Value::Text(text) => NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f"))
                .map_err(|err| Error::InvalidValue {
                    column: column.to_string(),
                    reason: format!("{text:?}: {err}"),
                }),
            other => mismatch(column, "timestamp", other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(column: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(column, other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_reads() {
        let record = Record::new("offences")
            .with_value("id", 3_i64)
            .with_value("description", "Public nudity.")
            .with_value("person_id", Value::Null)
            .with_value("datetime", "2024-02-29 13:45:00");

        assert_eq!(record.get::<i64>("id").unwrap(), 3);
        assert_eq!(record.get::<i32>("id").unwrap(), 3);
        assert_eq!(record.get::<String>("description").unwrap(), "Public nudity.");
        assert_eq!(record.get::<Option<i64>>("person_id").unwrap(), None);

        let at = record.get::<NaiveDateTime>("datetime").unwrap();
        assert_eq!(at.format(TIMESTAMP_FORMAT).to_string(), "2024-02-29 13:45:00");
    }

    #[test]
    fn missing_and_mismatched_columns() {
        let record = Record::new("cats").with_value("name", "Wombat");

        match record.get::<String>("colour") {
            Err(Error::MissingColumn { table, column }) => {
                assert_eq!(table, "cats");
                assert_eq!(column, "colour");
            }
            other => panic!("unexpected: {other:?}"),
        }

        match record.get::<i64>("name") {
            Err(Error::TypeMismatch { expected, found, .. }) => {
                assert_eq!(expected, "integer");
                assert_eq!(found, "text");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn narrowing_overflow_is_reported() {
        let record = Record::new("a").with_value("id", i64::MAX);
        assert!(matches!(
            record.get::<i32>("id"),
            Err(Error::InvalidValue { .. })
        ));
    }
}
