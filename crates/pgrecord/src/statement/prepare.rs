//! Statements built from records. Nothing here executes.

use super::{InsertStatement, UpdateStatement};
use crate::error::RecordResult;
use crate::expr::Condition;
use crate::record::Record;

/// Build an insert for every touched field of `record`.
///
/// With no touched field the statement inserts `DEFAULT VALUES`.
///
/// ```ignore
/// let mut book = Book::default();
/// book.title.set(Some("foo".into()));
/// book.pages.set(Some(123));
///
/// let insert = prepare_insert(&book);
/// assert_eq!(insert.to_sql(), r#"INSERT INTO "test"."book" ("title", "pages") VALUES ($1, $2)"#);
/// ```
pub fn prepare_insert<R: Record>(record: &R) -> InsertStatement {
    let table = R::TABLE;
    let mut insert = InsertStatement::new(table);
    for (i, column) in table.fields.iter().enumerate() {
        if let Some(field) = record.field(i).filter(|f| f.is_touched()) {
            insert = insert.set_param(*column, field.value());
        }
    }
    insert
}

/// Build an update of every touched field of `record`, filtered by its
/// primary key.
///
/// The filter uses the key fields' original values, so a record whose key was
/// reassigned still targets the row it was loaded from. A NULL original
/// renders as `IS NULL`.
///
/// Fails with [`MissingPrimaryKey`](crate::RecordError::MissingPrimaryKey)
/// when the table declares no primary key.
pub fn prepare_update<R: Record>(record: &R) -> RecordResult<UpdateStatement> {
    let table = R::TABLE;
    let primary_key = table.primary_key()?;

    let mut update = UpdateStatement::new(table);
    for (i, column) in table.fields.iter().enumerate() {
        if let Some(field) = record.field(i).filter(|f| f.is_touched()) {
            update = update.set_param(*column, field.value());
        }
    }

    for &index in primary_key {
        let (Some(column), Some(field)) = (table.column(index), record.field(index)) else {
            continue;
        };
        let original = field.original_value();
        let condition: Condition = if original.is_null() {
            column.is_null()
        } else {
            column.eq(original)
        };
        update = update.and_where(condition);
    }
    Ok(update)
}
