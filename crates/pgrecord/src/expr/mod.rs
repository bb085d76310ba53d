//! SQL expressions and columns.
//!
//! An [`Expr`] is a rendered SQL fragment (text plus bound values) that can be
//! compared, cast, shifted by intervals or matched against regular
//! expressions. Comparisons yield a [`Condition`].
//!
//! ```ignore
//! use pgrecord::prelude::*;
//!
//! let recent = Author::CREATED.expr().plus_days(7).gt(Expr::now());
//! let named = Author::LAST_NAME.eq("Tolkien".to_string());
//! let cond = recent.and(named);
//! ```

mod condition;
mod functions;

pub use condition::Condition;

use crate::ident;
use crate::sql::Sql;
use crate::value::{Param, SqlValue};

/// A column of a table, rendered fully qualified (`"schema"."table"."name"`).
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub schema: Option<&'static str>,
    pub table: &'static str,
    pub name: &'static str,
}

impl Column {
    pub const fn new(schema: Option<&'static str>, table: &'static str, name: &'static str) -> Self {
        Self {
            schema,
            table,
            name,
        }
    }

    /// Append the qualified, quoted column name.
    pub fn write_qualified(&self, out: &mut String) {
        match self.schema {
            Some(schema) => ident::write_qualified(out, &[schema, self.table, self.name]),
            None => ident::write_qualified(out, &[self.table, self.name]),
        }
    }

    /// The qualified, quoted column name.
    pub fn qualified(&self) -> String {
        let mut out = String::new();
        self.write_qualified(&mut out);
        out
    }

    /// The column as an expression.
    pub fn expr(&self) -> Expr {
        Expr::from(*self)
    }
}

impl Column {
    /// `column = value`
    pub fn eq(&self, value: impl Into<Expr>) -> Condition {
        self.expr().eq(value)
    }

    /// `column <> value`
    pub fn ne(&self, value: impl Into<Expr>) -> Condition {
        self.expr().ne(value)
    }

    /// `column > value`
    pub fn gt(&self, value: impl Into<Expr>) -> Condition {
        self.expr().gt(value)
    }

    /// `column >= value`
    pub fn gte(&self, value: impl Into<Expr>) -> Condition {
        self.expr().gte(value)
    }

    /// `column < value`
    pub fn lt(&self, value: impl Into<Expr>) -> Condition {
        self.expr().lt(value)
    }

    /// `column <= value`
    pub fn lte(&self, value: impl Into<Expr>) -> Condition {
        self.expr().lte(value)
    }

    pub fn is_null(&self) -> Condition {
        self.expr().is_null()
    }

    pub fn is_not_null(&self) -> Condition {
        self.expr().is_not_null()
    }

    /// `column AS "name"`
    pub fn alias(&self, name: &str) -> Expr {
        self.expr().alias(name)
    }

    /// `column IN ($1, $2, ...)`, every value bound.
    pub fn in_list<T: SqlValue>(
        &self,
        values: impl IntoIterator<Item = T>,
    ) -> crate::RecordResult<Condition> {
        self.expr().in_list(values)
    }

    /// `column IN (v1, v2, ...)`, every value inlined as a literal.
    pub fn contained_in<T: SqlValue>(
        &self,
        values: impl IntoIterator<Item = T>,
    ) -> crate::RecordResult<Condition> {
        self.expr().contained_in(values)
    }
}

/// A SQL expression.
#[derive(Debug, Clone)]
pub struct Expr {
    sql: Sql,
}

impl Expr {
    /// Raw SQL text, used verbatim.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self { sql: Sql::new(sql) }
    }

    /// A bound value (`$n`).
    pub fn value<T: SqlValue>(value: T) -> Self {
        Self::param(Param::new(value))
    }

    /// A bound, already wrapped value.
    pub fn param(param: Param) -> Self {
        let mut sql = Sql::empty();
        sql.push_param(param);
        Self { sql }
    }

    /// A value written out as a literal.
    pub fn literal<T: SqlValue>(value: T) -> Self {
        let mut sql = Sql::empty();
        sql.push_inline(value);
        Self { sql }
    }

    /// `*`
    pub fn asterisk() -> Self {
        Self::raw("*")
    }

    /// `now()`
    pub fn now() -> Self {
        Self::raw("now()")
    }

    /// Wrap an existing fragment.
    pub fn from_sql(sql: Sql) -> Self {
        Self { sql }
    }

    /// The underlying fragment.
    pub fn into_sql(self) -> Sql {
        self.sql
    }

    /// Borrow the underlying fragment.
    pub fn as_sql(&self) -> &Sql {
        &self.sql
    }

    fn compare(self, op: &str, rhs: impl Into<Expr>) -> Condition {
        let mut sql = self.sql;
        sql.push(" ").push(op).push(" ");
        let rhs = rhs.into().sql;
        if rhs.is_single_token() {
            sql.push_sql(rhs);
        } else {
            sql.push("(");
            sql.push_sql(rhs);
            sql.push(")");
        }
        Condition::from_sql(sql)
    }

    pub fn eq(self, rhs: impl Into<Expr>) -> Condition {
        self.compare("=", rhs)
    }

    pub fn ne(self, rhs: impl Into<Expr>) -> Condition {
        self.compare("<>", rhs)
    }

    pub fn gt(self, rhs: impl Into<Expr>) -> Condition {
        self.compare(">", rhs)
    }

    pub fn gte(self, rhs: impl Into<Expr>) -> Condition {
        self.compare(">=", rhs)
    }

    pub fn lt(self, rhs: impl Into<Expr>) -> Condition {
        self.compare("<", rhs)
    }

    pub fn lte(self, rhs: impl Into<Expr>) -> Condition {
        self.compare("<=", rhs)
    }

    pub fn is_null(self) -> Condition {
        let mut sql = self.sql;
        sql.push(" IS NULL");
        Condition::from_sql(sql)
    }

    pub fn is_not_null(self) -> Condition {
        let mut sql = self.sql;
        sql.push(" IS NOT NULL");
        Condition::from_sql(sql)
    }

    /// `expr AS "name"`, for select lists.
    pub fn alias(self, name: &str) -> Expr {
        let mut sql = self.sql;
        sql.push(" AS ");
        let mut quoted = String::new();
        ident::write_ident(&mut quoted, name);
        sql.push(&quoted);
        Self { sql }
    }
}

impl From<Column> for Expr {
    fn from(column: Column) -> Self {
        let mut out = String::new();
        column.write_qualified(&mut out);
        Self::raw(out)
    }
}

impl From<&Column> for Expr {
    fn from(column: &Column) -> Self {
        Self::from(*column)
    }
}

impl From<Sql> for Expr {
    fn from(sql: Sql) -> Self {
        Self::from_sql(sql)
    }
}

macro_rules! bind_into_expr {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Expr::value(value)
                }
            }
        )*
    };
}

bind_into_expr!(
    i16,
    i32,
    i64,
    f32,
    f64,
    bool,
    String,
    &'static str,
    uuid::Uuid,
    serde_json::Value,
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::FixedOffset>
);

impl From<Param> for Expr {
    fn from(param: Param) -> Self {
        Expr::param(param)
    }
}
