use super::Statement;
use crate::expr::{Condition, Expr};
use crate::record::Table;
use crate::sql::Sql;

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    fn as_sql(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

/// `SELECT .. FROM .. WHERE .. ORDER BY .. LIMIT .. OFFSET ..`
#[derive(Debug, Clone, Default)]
pub struct SelectStatement {
    columns: Vec<Expr>,
    from: Option<Table>,
    conditions: Vec<Condition>,
    order_by: Vec<(Expr, Order)>,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// Select the given expressions.
///
/// ```ignore
/// let names = select([Author::FIRST_NAME, Author::LAST_NAME])
///     .from(Author::TABLE)
///     .and_where(Author::ID.gt(10))
///     .order_by(Author::LAST_NAME, Order::Asc)
///     .limit(20);
/// ```
pub fn select<E: Into<Expr>>(columns: impl IntoIterator<Item = E>) -> SelectStatement {
    SelectStatement {
        columns: columns.into_iter().map(Into::into).collect(),
        ..SelectStatement::default()
    }
}

/// `SELECT * FROM <table>`
pub fn select_from(table: Table) -> SelectStatement {
    SelectStatement::default().from(table)
}

impl SelectStatement {
    pub fn from(mut self, table: Table) -> Self {
        self.from = Some(table);
        self
    }

    /// Add a condition; conditions are joined with `AND`.
    pub fn and_where(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn order_by(mut self, expr: impl Into<Expr>, order: Order) -> Self {
        self.order_by.push((expr.into(), order));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl Statement for SelectStatement {
    fn render(&self) -> Sql {
        let mut sql = Sql::new("SELECT ");
        if self.columns.is_empty() {
            sql.push("*");
        } else {
            for (i, column) in self.columns.iter().enumerate() {
                if i > 0 {
                    sql.push(", ");
                }
                sql.push_sql(column.as_sql().clone());
            }
        }

        if let Some(table) = &self.from {
            sql.push(" FROM ").push(&table.quoted_name());
        }

        if let Some(condition) = Condition::all(self.conditions.iter().cloned()) {
            sql.push(" WHERE ");
            sql.push_sql(condition.into_sql());
        }

        for (i, (expr, order)) in self.order_by.iter().enumerate() {
            sql.push(if i == 0 { " ORDER BY " } else { ", " });
            sql.push_sql(expr.as_sql().clone());
            sql.push(" ").push(order.as_sql());
        }

        if let Some(limit) = self.limit {
            sql.push(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            sql.push(&format!(" OFFSET {offset}"));
        }
        sql
    }
}
