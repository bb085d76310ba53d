use super::Statement;
use crate::error::{RecordError, RecordResult};
use crate::expr::Condition;
use crate::ident;
use crate::record::Table;
use crate::sql::Sql;
use crate::value::{Param, SqlValue};

/// `UPDATE .. SET .. WHERE ..`
#[derive(Debug, Clone)]
pub struct UpdateStatement {
    table: Table,
    sets: Vec<(&'static str, Param)>,
    conditions: Vec<Condition>,
    returning: bool,
}

impl UpdateStatement {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            sets: Vec::new(),
            conditions: Vec::new(),
            returning: false,
        }
    }

    /// Set a column value.
    pub fn set<T: SqlValue>(self, column: &'static str, value: T) -> Self {
        self.set_param(column, Param::new(value))
    }

    /// Set a column to an already wrapped value.
    pub fn set_param(mut self, column: &'static str, value: Param) -> Self {
        self.sets.push((column, value));
        self
    }

    /// Add a condition; conditions are joined with `AND`.
    pub fn and_where(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add `RETURNING *`.
    pub fn returning_all(mut self) -> Self {
        self.returning = true;
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Columns in the SET clause, in order.
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sets.iter().map(|(c, _)| *c)
    }

    /// Whether the SET clause is empty.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl Statement for UpdateStatement {
    fn render(&self) -> Sql {
        let mut sql = Sql::new("UPDATE ");
        sql.push(&self.table.quoted_name());
        sql.push(" SET ");
        for (i, (column, value)) in self.sets.iter().enumerate() {
            if i > 0 {
                sql.push(", ");
            }
            sql.push(&ident::quote_ident(column));
            sql.push(" = ");
            sql.push_param(value.clone());
        }

        if let Some(condition) = Condition::all(self.conditions.iter().cloned()) {
            sql.push(" WHERE ");
            sql.push_sql(condition.into_sql());
        }

        if self.returning {
            sql.push(" RETURNING *");
        }
        sql
    }

    fn validate(&self) -> RecordResult<()> {
        if self.sets.is_empty() {
            return Err(RecordError::validation(
                "UPDATE requires at least one SET column",
            ));
        }
        Ok(())
    }
}
