//! Hand-written records for unit tests.

use crate::error::RecordResult;
use crate::record::{FieldState, Record, Table, Tracked};
use crate::row::{FromRow, RowExt};
use tokio_postgres::Row;

#[derive(Debug, Clone, Default)]
pub(crate) struct Book {
    pub id: Tracked<Option<i32>>,
    pub title: Tracked<Option<String>>,
    pub pages: Tracked<Option<i32>>,
}

impl Book {
    pub fn loaded(id: i32, title: &str, pages: i32) -> Self {
        Self {
            id: Tracked::new(Some(id)),
            title: Tracked::new(Some(title.to_string())),
            pages: Tracked::new(Some(pages)),
        }
    }
}

impl FromRow for Book {
    fn from_row(row: &Row) -> RecordResult<Self> {
        Ok(Self {
            id: Tracked::new(row.try_get_column("id")?),
            title: Tracked::new(row.try_get_column("title")?),
            pages: Tracked::new(row.try_get_column("pages")?),
        })
    }
}

impl Record for Book {
    const TABLE: Table = Table {
        schema: Some("test"),
        name: "book",
        fields: &["id", "title", "pages"],
        primary_key: Some(&[0]),
    };

    fn field(&self, index: usize) -> Option<&dyn FieldState> {
        match index {
            0 => Some(&self.id),
            1 => Some(&self.title),
            2 => Some(&self.pages),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn FieldState> {
        match index {
            0 => Some(&mut self.id),
            1 => Some(&mut self.title),
            2 => Some(&mut self.pages),
            _ => None,
        }
    }
}

/// A keyless table.
#[derive(Debug, Clone, Default)]
pub(crate) struct LogLine {
    pub message: Tracked<String>,
}

impl FromRow for LogLine {
    fn from_row(row: &Row) -> RecordResult<Self> {
        Ok(Self {
            message: Tracked::new(row.try_get_column("message")?),
        })
    }
}

impl Record for LogLine {
    const TABLE: Table = Table {
        schema: None,
        name: "log_line",
        fields: &["message"],
        primary_key: None,
    };

    fn field(&self, index: usize) -> Option<&dyn FieldState> {
        match index {
            0 => Some(&self.message),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn FieldState> {
        match index {
            0 => Some(&mut self.message),
            _ => None,
        }
    }
}

/// A table keyed by two columns.
#[derive(Debug, Clone, Default)]
pub(crate) struct Membership {
    pub group_id: Tracked<i32>,
    pub member: Tracked<Option<String>>,
    pub role: Tracked<String>,
}

impl FromRow for Membership {
    fn from_row(row: &Row) -> RecordResult<Self> {
        Ok(Self {
            group_id: Tracked::new(row.try_get_column("group_id")?),
            member: Tracked::new(row.try_get_column("member")?),
            role: Tracked::new(row.try_get_column("role")?),
        })
    }
}

impl Record for Membership {
    const TABLE: Table = Table {
        schema: Some("test"),
        name: "membership",
        fields: &["group_id", "member", "role"],
        primary_key: Some(&[0, 1]),
    };

    fn field(&self, index: usize) -> Option<&dyn FieldState> {
        match index {
            0 => Some(&self.group_id),
            1 => Some(&self.member),
            2 => Some(&self.role),
            _ => None,
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn FieldState> {
        match index {
            0 => Some(&mut self.group_id),
            1 => Some(&mut self.member),
            2 => Some(&mut self.role),
            _ => None,
        }
    }
}
