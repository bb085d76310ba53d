//! Table-shaped records with per-field change tracking.
//!
//! A record is a struct of [`Tracked`] fields bound to one [`Table`]. Derive
//! it:
//!
//! ```ignore
//! use pgrecord::{Record, Tracked};
//!
//! #[derive(Debug, Clone, Default, Record)]
//! #[orm(table = "author", schema = "test")]
//! pub struct Author {
//!     #[orm(id)]
//!     pub id: Tracked<Option<i32>>,
//!     pub first_name: Tracked<Option<String>>,
//!     pub last_name: Tracked<String>,
//! }
//! ```

mod tracked;

pub use tracked::{FieldState, Tracked};

use crate::error::{RecordError, RecordResult};
use crate::expr::Column;
use crate::ident;
use crate::row::FromRow;
use std::fmt;

/// Static table metadata.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    pub schema: Option<&'static str>,
    pub name: &'static str,
    /// Column names, in field order.
    pub fields: &'static [&'static str],
    /// Field indices forming the primary key.
    pub primary_key: Option<&'static [usize]>,
}

impl Table {
    /// Append the quoted, schema-qualified table name.
    pub fn write_name(&self, out: &mut String) {
        match self.schema {
            Some(schema) => ident::write_qualified(out, &[schema, self.name]),
            None => ident::write_ident(out, self.name),
        }
    }

    /// The quoted, schema-qualified table name.
    pub fn quoted_name(&self) -> String {
        let mut out = String::new();
        self.write_name(&mut out);
        out
    }

    /// The column backing field `index`.
    pub fn column(&self, index: usize) -> Option<Column> {
        self.fields
            .get(index)
            .map(|name| Column::new(self.schema, self.name, *name))
    }

    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        (0..self.fields.len()).filter_map(|i| self.column(i))
    }

    /// Primary key field indices, or [`RecordError::MissingPrimaryKey`].
    pub fn primary_key(&self) -> RecordResult<&'static [usize]> {
        match self.primary_key {
            Some(pk) if !pk.is_empty() => Ok(pk),
            _ => Err(RecordError::MissingPrimaryKey(self.to_string())),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => f.write_str(self.name),
        }
    }
}

/// A mutable, table-shaped value with tracked fields.
///
/// Field `i` corresponds to `TABLE.fields[i]`.
pub trait Record: FromRow + Send + Sync + 'static {
    const TABLE: Table;

    fn field(&self, index: usize) -> Option<&dyn FieldState>;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn FieldState>;

    /// Number of fields.
    fn size(&self) -> usize {
        Self::TABLE.fields.len()
    }

    /// Whether field `index` was assigned since the last persist.
    fn touched(&self, index: usize) -> bool {
        self.field(index).is_some_and(|f| f.is_touched())
    }

    /// Whether any field was assigned, regardless of value.
    fn is_touched(&self) -> bool {
        (0..self.size()).any(|i| self.touched(i))
    }

    /// Whether any touched field holds a value different from its original.
    fn values_changed(&self) -> bool
    where
        Self: Sized,
    {
        values_changed(self)
    }

    /// Make every field clean; originals become the current values.
    fn reset_touched(&mut self) {
        for i in 0..self.size() {
            if let Some(field) = self.field_mut(i) {
                field.mark_persisted();
            }
        }
    }
}

/// Real-change detection: assignments of an equal value do not count.
pub fn values_changed<R: Record>(record: &R) -> bool {
    for i in 0..record.size() {
        if record.field(i).is_some_and(|f| f.is_changed()) {
            return true;
        }
    }
    false
}
