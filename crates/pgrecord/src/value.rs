//! Bindable values that can also be rendered as SQL literals.
//!
//! Statements bind their values as `$n` parameters when executed, but golden
//! tests, trace logs and inlined IN-lists need the same values written out as
//! literals. [`SqlValue`] provides both sides.

use std::fmt;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// Exposes a value as a `tokio-postgres` parameter through a trait object.
pub trait AsToSql {
    fn as_to_sql(&self) -> &(dyn ToSql + Sync);
}

impl<T: ToSql + Sync> AsToSql for T {
    fn as_to_sql(&self) -> &(dyn ToSql + Sync) {
        self
    }
}

/// A value that can be bound as a parameter and rendered as a SQL literal.
pub trait SqlValue: AsToSql + ToSql + Send + Sync + 'static {
    /// Append this value as a SQL literal (quoted and escaped where needed).
    fn write_literal(&self, out: &mut String);

    /// Whether this value is SQL `NULL`.
    fn is_null(&self) -> bool {
        false
    }
}

/// Append `s` as a single-quoted SQL string literal.
pub fn write_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
}

macro_rules! impl_display_literal {
    ($($ty:ty),*) => {
        $(
            impl SqlValue for $ty {
                fn write_literal(&self, out: &mut String) {
                    use std::fmt::Write;
                    let _ = write!(out, "{}", self);
                }
            }
        )*
    };
}

impl_display_literal!(i16, i32, i64, u32);

macro_rules! impl_float_literal {
    ($($ty:ty),*) => {
        $(
            impl SqlValue for $ty {
                fn write_literal(&self, out: &mut String) {
                    use std::fmt::Write;
                    if self.is_finite() {
                        let _ = write!(out, "{}", self);
                    } else if self.is_nan() {
                        out.push_str("'NaN'");
                    } else if self.is_sign_positive() {
                        out.push_str("'Infinity'");
                    } else {
                        out.push_str("'-Infinity'");
                    }
                }
            }
        )*
    };
}

impl_float_literal!(f32, f64);

impl SqlValue for bool {
    fn write_literal(&self, out: &mut String) {
        out.push_str(if *self { "TRUE" } else { "FALSE" });
    }
}

impl SqlValue for String {
    fn write_literal(&self, out: &mut String) {
        write_quoted(out, self);
    }
}

impl SqlValue for &'static str {
    fn write_literal(&self, out: &mut String) {
        write_quoted(out, self);
    }
}

impl SqlValue for uuid::Uuid {
    fn write_literal(&self, out: &mut String) {
        write_quoted(out, &self.to_string());
    }
}

impl SqlValue for serde_json::Value {
    fn write_literal(&self, out: &mut String) {
        write_quoted(out, &self.to_string());
    }
}

impl SqlValue for chrono::NaiveDate {
    fn write_literal(&self, out: &mut String) {
        write_quoted(out, &self.format("%Y-%m-%d").to_string());
    }
}

impl SqlValue for chrono::NaiveTime {
    fn write_literal(&self, out: &mut String) {
        write_quoted(out, &self.format("%H:%M:%S%.f").to_string());
    }
}

impl SqlValue for chrono::NaiveDateTime {
    fn write_literal(&self, out: &mut String) {
        write_quoted(out, &self.format("%Y-%m-%d %H:%M:%S%.f").to_string());
    }
}

impl SqlValue for chrono::DateTime<chrono::Utc> {
    fn write_literal(&self, out: &mut String) {
        write_quoted(out, &self.format("%Y-%m-%d %H:%M:%S%.f%:z").to_string());
    }
}

impl SqlValue for chrono::DateTime<chrono::FixedOffset> {
    fn write_literal(&self, out: &mut String) {
        write_quoted(out, &self.format("%Y-%m-%d %H:%M:%S%.f%:z").to_string());
    }
}

impl<T: SqlValue> SqlValue for Option<T> {
    fn write_literal(&self, out: &mut String) {
        match self {
            Some(v) => v.write_literal(out),
            None => out.push_str("NULL"),
        }
    }

    fn is_null(&self) -> bool {
        self.as_ref().is_none_or(SqlValue::is_null)
    }
}

impl<T: SqlValue> SqlValue for Vec<T> {
    fn write_literal(&self, out: &mut String) {
        // `ARRAY[]` needs an element type; the untyped literal takes it from context.
        if self.is_empty() {
            out.push_str("'{}'");
            return;
        }
        out.push_str("ARRAY[");
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            v.write_literal(out);
        }
        out.push(']');
    }
}

/// A clone-friendly parameter wrapper.
///
/// Statements can be cloned, logged and re-rendered without copying the
/// underlying values.
#[derive(Clone)]
pub struct Param(Arc<dyn SqlValue>);

impl Param {
    /// Wrap any [`SqlValue`].
    pub fn new<T: SqlValue>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// The value as a `tokio-postgres` parameter.
    pub fn as_to_sql(&self) -> &(dyn ToSql + Sync) {
        self.0.as_to_sql()
    }

    /// Whether the wrapped value is SQL `NULL`.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Append the wrapped value as a SQL literal.
    pub fn write_literal(&self, out: &mut String) {
        self.0.write_literal(out);
    }

    /// Render the wrapped value as a SQL literal.
    pub fn to_literal(&self) -> String {
        let mut out = String::new();
        self.write_literal(&mut out);
        out
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Param").field(&self.to_literal()).finish()
    }
}
