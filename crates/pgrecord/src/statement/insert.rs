use super::Statement;
use crate::error::{RecordError, RecordResult};
use crate::ident;
use crate::record::Table;
use crate::sql::Sql;
use crate::value::{Param, SqlValue};

/// What to do when an insert hits a conflict on its target columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictAction {
    /// `DO NOTHING`
    DoNothing,
    /// `DO UPDATE SET` the same values the insert carries.
    DoUpdate,
}

/// `INSERT INTO .. VALUES ..` for one row.
#[derive(Debug, Clone)]
pub struct InsertStatement {
    table: Table,
    values: Vec<(&'static str, Param)>,
    conflict: Option<(Vec<&'static str>, ConflictAction)>,
    returning: bool,
}

impl InsertStatement {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            values: Vec::new(),
            conflict: None,
            returning: false,
        }
    }

    /// Set a column value.
    pub fn set<T: SqlValue>(self, column: &'static str, value: T) -> Self {
        self.set_param(column, Param::new(value))
    }

    /// Set a column to an already wrapped value.
    pub fn set_param(mut self, column: &'static str, value: Param) -> Self {
        self.values.push((column, value));
        self
    }

    /// Add `ON CONFLICT (<target>) DO ..`.
    pub fn on_conflict(mut self, target: &[&'static str], action: ConflictAction) -> Self {
        self.conflict = Some((target.to_vec(), action));
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

    /// Columns receiving a value, in order.
    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.iter().map(|(c, _)| *c)
    }

    /// Whether no column receives a value (`DEFAULT VALUES`).
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn push_assignments(sql: &mut Sql, values: &[(&'static str, Param)]) {
    for (i, (column, value)) in values.iter().enumerate() {
        if i > 0 {
            sql.push(", ");
        }
        sql.push(&ident::quote_ident(column));
        sql.push(" = ");
        sql.push_param(value.clone());
    }
}

impl Statement for InsertStatement {
    fn render(&self) -> Sql {
        let mut sql = Sql::new("INSERT INTO ");
        sql.push(&self.table.quoted_name());

        if self.values.is_empty() {
            sql.push(" DEFAULT VALUES");
        } else {
            let columns = self
                .values
                .iter()
                .map(|(c, _)| ident::quote_ident(c))
                .collect::<Vec<_>>()
                .join(", ");
            sql.push(" (").push(&columns).push(") VALUES (");
            for (i, (_, value)) in self.values.iter().enumerate() {
                if i > 0 {
                    sql.push(", ");
                }
                sql.push_param(value.clone());
            }
            sql.push(")");
        }

        if let Some((target, action)) = &self.conflict {
            sql.push(" ON CONFLICT");
            if !target.is_empty() {
                let target = target
                    .iter()
                    .map(|c| ident::quote_ident(c))
                    .collect::<Vec<_>>()
                    .join(", ");
                sql.push(" (").push(&target).push(")");
            }
            match action {
                ConflictAction::DoNothing => {
                    sql.push(" DO NOTHING");
                }
                ConflictAction::DoUpdate => {
                    sql.push(" DO UPDATE SET ");
                    push_assignments(&mut sql, &self.values);
                }
            }
        }

        if self.returning {
            sql.push(" RETURNING *");
        }
        sql
    }

    fn validate(&self) -> RecordResult<()> {
        if let Some((target, ConflictAction::DoUpdate)) = &self.conflict {
            if target.is_empty() {
                return Err(RecordError::validation(
                    "ON CONFLICT DO UPDATE requires a conflict target",
                ));
            }
            if self.values.is_empty() {
                return Err(RecordError::validation(
                    "ON CONFLICT DO UPDATE requires at least one SET column",
                ));
            }
        }
        Ok(())
    }
}
