//! SQL fragment builder.
//!
//! [`Sql`] stores raw SQL text and bound values separately and numbers the
//! `$1, $2, ...` placeholders only when rendered, so fragments built in
//! isolation (expressions, conditions, whole statements) can be composed
//! without tracking indices by hand.
//!
//! # Example
//!
//! ```ignore
//! use pgrecord::sql;
//!
//! let mut q = sql("SELECT id FROM author WHERE last_name = ");
//! q.push_bind("Tolkien".to_string());
//!
//! assert_eq!(q.to_sql(), "SELECT id FROM author WHERE last_name = $1");
//! assert_eq!(q.to_inlined_sql(), "SELECT id FROM author WHERE last_name = 'Tolkien'");
//! ```

use crate::error::{RecordError, RecordResult};
use crate::ident;
use crate::value::{Param, SqlValue};
use tokio_postgres::types::ToSql;

#[derive(Debug, Clone)]
enum SqlPart {
    Raw(String),
    Param(Param),
}

/// A parameter-safe SQL fragment.
#[derive(Debug, Clone, Default)]
pub struct Sql {
    parts: Vec<SqlPart>,
}

/// Start building a SQL fragment.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}

impl Sql {
    /// Create a new builder with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        let mut out = Self::empty();
        out.push(&initial_sql.into());
        out
    }

    /// Create an empty builder.
    pub fn empty() -> Self {
        Self { parts: Vec::new() }
    }

    /// Whether nothing has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// A single placeholder, or raw SQL without whitespace.
    pub(crate) fn is_single_token(&self) -> bool {
        match self.parts.as_slice() {
            [SqlPart::Param(_)] => true,
            [SqlPart::Raw(s)] => !s.chars().any(char::is_whitespace),
            _ => false,
        }
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a parameter placeholder and bind its value.
    pub fn push_bind<T: SqlValue>(&mut self, value: T) -> &mut Self {
        self.push_param(Param::new(value))
    }

    /// Append a placeholder for an already wrapped value.
    pub fn push_param(&mut self, param: Param) -> &mut Self {
        self.parts.push(SqlPart::Param(param));
        self
    }

    /// Append a value as an inline literal (no placeholder).
    pub fn push_inline<T: SqlValue>(&mut self, value: T) -> &mut Self {
        let mut literal = String::new();
        value.write_literal(&mut literal);
        self.push(&literal)
    }

    /// Append a comma-separated list of placeholders and bind all values.
    pub fn push_bind_list<T: SqlValue>(&mut self, values: impl IntoIterator<Item = T>) -> &mut Self {
        for (i, v) in values.into_iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_bind(v);
        }
        self
    }

    /// Append another fragment, consuming it.
    pub fn push_sql(&mut self, other: Sql) -> &mut Self {
        for part in other.parts {
            match part {
                SqlPart::Raw(s) => {
                    self.push(&s);
                }
                SqlPart::Param(p) => {
                    self.push_param(p);
                }
            }
        }
        self
    }

    /// Append a quoted identifier.
    ///
    /// Rejects anything but `[A-Za-z_][A-Za-z0-9_$]*` segments separated by `.`.
    pub fn push_ident(&mut self, name: &str) -> RecordResult<&mut Self> {
        let segments: Vec<&str> = name.split('.').collect();
        if segments.iter().any(|seg| !ident::is_plain_ident(seg)) {
            return Err(RecordError::validation(format!(
                "Sql::push_ident: invalid identifier '{name}'"
            )));
        }
        let mut quoted = String::new();
        ident::write_qualified(&mut quoted, &segments);
        Ok(self.push(&quoted))
    }

    /// Render SQL with `$1, $2, ...` placeholders.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        let mut idx: usize = 0;

        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param(_) => {
                    idx += 1;
                    use std::fmt::Write;
                    let _ = write!(&mut out, "${}", idx);
                }
            }
        }
        out
    }

    /// Render SQL with every bound value written out as a literal.
    pub fn to_inlined_sql(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param(p) => p.write_literal(&mut out),
            }
        }
        out
    }

    /// Bound values in placeholder order.
    pub fn bind_values(&self) -> Vec<Param> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                SqlPart::Param(p) => Some(p.clone()),
                SqlPart::Raw(_) => None,
            })
            .collect()
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                SqlPart::Param(p) => Some(p.as_to_sql()),
                SqlPart::Raw(_) => None,
            })
            .collect()
    }
}
