//! Build-and-run helpers for records.
//!
//! Every function borrows the client, so passing a transaction runs the
//! statement inside it. Database errors are returned unchanged.

use super::bridge::StatementExt;
use crate::client::GenericClient;
use crate::error::{RecordError, RecordResult};
use crate::record::{Record, values_changed};
use crate::statement::{ConflictAction, prepare_insert, prepare_update};
use tracing::debug;

/// Default-construct a record, apply `init` and insert it.
///
/// Returns the inserted row, including generated keys and column defaults.
///
/// ```ignore
/// let author: Author = create(&client, |a: &mut Author| {
///     a.first_name.set(Some("foo".into()));
///     a.last_name.set("bar".into());
/// })
/// .await?;
/// ```
pub async fn create<R, F>(conn: &impl GenericClient, init: F) -> RecordResult<R>
where
    R: Record + Default,
    F: FnOnce(&mut R),
{
    let mut record = R::default();
    init(&mut record);

    let created = prepare_insert(&record)
        .returning_all()
        .fetch_one_as::<R>(conn)
        .await?;
    debug!(target: "pgrecord", table = %R::TABLE, "record created");
    Ok(created)
}

/// Update `record` by primary key and return the number of affected rows.
///
/// The record is marked clean once a row was written. When no row matched the
/// key, it keeps its pending changes.
pub async fn update<R: Record>(conn: &impl GenericClient, record: &mut R) -> RecordResult<u64> {
    let affected = prepare_update(record)?.execute(conn).await?;
    if affected > 0 {
        record.reset_touched();
    }
    debug!(target: "pgrecord", table = %R::TABLE, affected, "record updated");
    Ok(affected)
}

/// Like [`update`], but only when a touched field holds a new value.
///
/// Returns `None` without contacting the database otherwise.
pub async fn update_if_changed<R: Record>(
    conn: &impl GenericClient,
    record: &mut R,
) -> RecordResult<Option<u64>> {
    if !values_changed(record) {
        debug!(target: "pgrecord", table = %R::TABLE, "record unchanged, update skipped");
        return Ok(None);
    }
    update(conn, record).await.map(Some)
}

/// Insert `record` and overwrite it with the returned row.
///
/// Afterwards the record holds generated keys and defaulted columns and is
/// clean.
pub async fn insert_and_refresh<'r, R: Record>(
    conn: &impl GenericClient,
    record: &'r mut R,
) -> RecordResult<&'r mut R> {
    let inserted = prepare_insert(&*record)
        .returning_all()
        .fetch_one_as::<R>(conn)
        .await?;
    *record = inserted;
    Ok(record)
}

/// Insert `record`, or update the existing row with the same primary key.
///
/// Both branches write the record's touched fields. Returns the row as stored.
pub async fn upsert<R: Record>(conn: &impl GenericClient, record: &R) -> RecordResult<R> {
    let table = R::TABLE;
    let target: Vec<&'static str> = table
        .primary_key()?
        .iter()
        .filter_map(|&i| table.fields.get(i).copied())
        .collect();

    let insert = prepare_insert(record);
    if insert.is_empty() {
        return Err(RecordError::validation(format!(
            "upsert into {table} requires at least one touched field"
        )));
    }

    let stored = insert
        .on_conflict(&target, ConflictAction::DoUpdate)
        .returning_all()
        .fetch_one_as::<R>(conn)
        .await?;
    debug!(target: "pgrecord", table = %table, "record upserted");
    Ok(stored)
}

/// Default-construct a record, apply `init` and [`upsert`] it.
pub async fn upsert_with<R, F>(conn: &impl GenericClient, init: F) -> RecordResult<R>
where
    R: Record + Default,
    F: FnOnce(&mut R),
{
    let mut record = R::default();
    init(&mut record);
    upsert(conn, &record).await
}
