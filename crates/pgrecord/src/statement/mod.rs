//! Insert, update and select statements.
//!
//! Statements are plain values: building one never touches the database.
//! Render them with [`Statement::to_sql`] (placeholders) or
//! [`Statement::to_inlined_sql`] (literals), and execute them through
//! [`StatementExt`](crate::StatementExt).

mod insert;
mod prepare;
mod select;
mod update;

pub use insert::{ConflictAction, InsertStatement};
pub use prepare::{prepare_insert, prepare_update};
pub use select::{Order, SelectStatement, select, select_from};
pub use update::UpdateStatement;

use crate::error::RecordResult;
use crate::sql::Sql;
use crate::value::Param;

/// Anything that renders to a single SQL statement.
pub trait Statement: Send + Sync {
    /// Render the statement as a fragment (SQL text plus bound values).
    fn render(&self) -> Sql;

    /// Reject statements that must not reach the database.
    fn validate(&self) -> RecordResult<()> {
        Ok(())
    }

    /// SQL text with `$1, $2, ...` placeholders.
    fn to_sql(&self) -> String {
        self.render().to_sql()
    }

    /// SQL text with every bound value written out as a literal.
    fn to_inlined_sql(&self) -> String {
        self.render().to_inlined_sql()
    }

    /// Bound values in placeholder order.
    fn bind_values(&self) -> Vec<Param> {
        self.render().bind_values()
    }
}

impl Statement for Sql {
    fn render(&self) -> Sql {
        self.clone()
    }
}

impl<S: Statement + ?Sized> Statement for &S {
    fn render(&self) -> Sql {
        (**self).render()
    }

    fn validate(&self) -> RecordResult<()> {
        (**self).validate()
    }
}

#[cfg(test)]
mod tests;
