//! Boolean conditions for WHERE clauses.

use super::Expr;
use crate::error::{RecordError, RecordResult};
use crate::sql::Sql;
use crate::value::SqlValue;

/// A boolean SQL condition.
///
/// Conditions combine with [`and`](Condition::and) / [`or`](Condition::or);
/// OR groups are parenthesized so the result can be nested freely.
#[derive(Debug, Clone)]
pub struct Condition {
    sql: Sql,
}

impl Condition {
    /// Raw SQL condition, used verbatim.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self { sql: Sql::new(sql) }
    }

    /// Wrap an existing fragment.
    pub fn from_sql(sql: Sql) -> Self {
        Self { sql }
    }

    /// `TRUE`
    pub fn always() -> Self {
        Self::raw("TRUE")
    }

    /// `self AND other`
    pub fn and(self, other: Condition) -> Self {
        let mut sql = self.sql;
        sql.push(" AND ");
        sql.push_sql(other.sql);
        Self { sql }
    }

    /// `(self OR other)`
    pub fn or(self, other: Condition) -> Self {
        let mut sql = Sql::new("(");
        sql.push_sql(self.sql);
        sql.push(" OR ");
        sql.push_sql(other.sql);
        sql.push(")");
        Self { sql }
    }

    /// `NOT (self)`
    pub fn not(self) -> Self {
        let mut sql = Sql::new("NOT (");
        sql.push_sql(self.sql);
        sql.push(")");
        Self { sql }
    }

    /// Conjunction of all conditions; `None` when the input is empty.
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Option<Self> {
        conditions.into_iter().reduce(Condition::and)
    }

    pub fn into_sql(self) -> Sql {
        self.sql
    }

    pub fn as_sql(&self) -> &Sql {
        &self.sql
    }
}

impl From<Condition> for Expr {
    fn from(condition: Condition) -> Self {
        Expr::from_sql(condition.sql)
    }
}

const EMPTY_IN_LIST: &str = "values in an IN condition can not be empty";

impl Expr {
    /// `expr IN ($1, $2, ...)` with every value bound.
    ///
    /// Returns [`RecordError::InvalidArgument`] for an empty input.
    pub fn in_list<T: SqlValue>(self, values: impl IntoIterator<Item = T>) -> RecordResult<Condition> {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return Err(RecordError::invalid_argument(EMPTY_IN_LIST));
        }

        let mut sql = self.into_sql();
        sql.push(" IN (");
        sql.push_bind_list(values);
        sql.push(")");
        Ok(Condition::from_sql(sql))
    }

    /// `expr IN (v1, v2, ...)` with every value inlined as an escaped literal.
    ///
    /// Returns [`RecordError::InvalidArgument`] for an empty input.
    ///
    /// ```ignore
    /// let cond = Author::ID.contained_in(vec![1, 2, 3])?;
    /// assert_eq!(cond.as_sql().to_sql(), r#""test"."author"."id" IN (1, 2, 3)"#);
    /// ```
    pub fn contained_in<T: SqlValue>(
        self,
        values: impl IntoIterator<Item = T>,
    ) -> RecordResult<Condition> {
        let mut list = String::new();
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                list.push_str(", ");
            }
            value.write_literal(&mut list);
        }
        if list.is_empty() {
            return Err(RecordError::invalid_argument(EMPTY_IN_LIST));
        }

        let mut sql = self.into_sql();
        sql.push(" IN (").push(&list).push(")");
        Ok(Condition::from_sql(sql))
    }
}
