//! Row mapping traits and SQL type names

use crate::error::{RecordError, RecordResult};
use std::borrow::Cow;
use tokio_postgres::Row;

/// Maps Rust types to PostgreSQL type names.
///
/// Used by [`Expr::cast_as`](crate::Expr::cast_as) to render `CAST(.. AS <type>)`.
pub trait PgType {
    /// Returns the PostgreSQL type name (e.g. `"text"`, `"bigint"`).
    fn pg_type() -> Cow<'static, str>;
}

macro_rules! impl_pg_type {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl PgType for $ty {
                fn pg_type() -> Cow<'static, str> {
                    Cow::Borrowed($name)
                }
            }
        )*
    };
}

impl_pg_type! {
    i16 => "smallint",
    i32 => "integer",
    i64 => "bigint",
    f32 => "real",
    f64 => "double precision",
    bool => "boolean",
    String => "text",
    &str => "text",
    serde_json::Value => "jsonb",
    uuid::Uuid => "uuid",
    chrono::NaiveDate => "date",
    chrono::NaiveTime => "time",
    chrono::NaiveDateTime => "timestamp",
}

impl<Tz: chrono::TimeZone> PgType for chrono::DateTime<Tz> {
    fn pg_type() -> Cow<'static, str> {
        Cow::Borrowed("timestamptz")
    }
}

// Vec<T> is a Postgres array of T.
impl<T: PgType> PgType for Vec<T> {
    fn pg_type() -> Cow<'static, str> {
        Cow::Owned(format!("{}[]", T::pg_type()))
    }
}

// Option<T> delegates to inner type
impl<T: PgType> PgType for Option<T> {
    fn pg_type() -> Cow<'static, str> {
        T::pg_type()
    }
}

/// Trait for converting a database row into a Rust struct.
///
/// Columns are bound to fields by name. Derive it with `#[derive(FromRow)]`:
///
/// ```ignore
/// use pgrecord::FromRow;
///
/// #[derive(FromRow)]
/// struct AuthorName {
///     id: i32,
///     #[orm(column = "first_name")]
///     name: String,
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> RecordResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning `RecordError::Decode` on failure
    fn try_get_column<T>(&self, column: &str) -> RecordResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> RecordResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| RecordError::decode(column, e.to_string()))
    }
}
