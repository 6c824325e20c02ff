// used for persistence
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use tracing::debug;

use crate::destination::Destination;
use crate::encode::Encode;
use crate::optional::Optional;
use crate::value::Value;

// ------------- Driver boundary -------------
// SQLite has no timestamp storage class; timestamps go out as text in the
// same layout rusqlite's own chrono support reads and writes.
impl From<Value> for rusqlite::types::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Integer(i64::from(b)),
            Value::Float(x) => Self::Real(x),
            Value::Int(i) => Self::Integer(i),
            Value::Text(s) => Self::Text(s),
            Value::Bytes(b) => Self::Blob(b),
            Value::Timestamp(t) => Self::Text(t.format("%F %T%.f%:z").to_string()),
        }
    }
}

impl<T: Destination + Default> FromSql for Optional<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let src = Value::from(value);
        debug!(wire = src.type_name(), "decoding column");
        let mut optional = Optional::empty();
        optional.scan(src)?;
        Ok(optional)
    }
}

impl<T: Encode> ToSql for Optional<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = self.encode()?;
        Ok(ToSqlOutput::Owned(value.into()))
    }
}
