//! Record mutators and fetch helpers against a live database.
//!
//! Skipped unless `DATABASE_URL` is set (directly or through `.env`).

mod common;

use chrono::{TimeZone, Utc};
use common::{Author, AuthorName, Book, count_authors_named, try_connect, unique, unique_id};
use futures_util::TryStreamExt;
use pgrecord::prelude::*;
use pgrecord::{Expr, InsertStatement};

macro_rules! connect_or_skip {
    ($name:literal) => {
        match try_connect().await {
            Some(client) => client,
            None => {
                eprintln!("DATABASE_URL is not set; skipping {}", $name);
                return Ok(());
            }
        }
    };
}

async fn find_author(client: &tokio_postgres::Client, id: i32) -> RecordResult<Author> {
    select_from(Author::TABLE)
        .and_where(Author::ID.eq(id))
        .fetch_one_as(client)
        .await
}

async fn new_author(client: &tokio_postgres::Client, first_name: &str) -> RecordResult<Author> {
    let last_name = unique("author");
    create(client, |a: &mut Author| {
        a.set_first_name(Some(first_name.to_string()));
        a.set_last_name(last_name);
    })
    .await
}

#[tokio::test]
async fn insert_and_refresh_fills_generated_columns() -> RecordResult<()> {
    let client = connect_or_skip!("insert_and_refresh_fills_generated_columns");

    let last_name = unique("max");
    let mut author = Author::default();
    author.set_first_name(Some("max".to_string()));
    author.set_last_name(last_name.clone());

    insert_and_refresh(&client, &mut author).await?;

    assert!(author.id().is_some());
    assert!(author.created().is_some());
    assert_eq!(author.last_name(), &last_name);
    assert!(!author.is_touched());
    assert_eq!(count_authors_named(&client, &last_name).await?, 1);
    Ok(())
}

#[tokio::test]
async fn create_returns_the_stored_row() -> RecordResult<()> {
    let client = connect_or_skip!("create_returns_the_stored_row");

    let author = new_author(&client, "foo").await?;
    let id = author.id().expect("generated id");

    let stored = find_author(&client, id).await?;
    assert_eq!(stored.first_name(), &Some("foo".to_string()));
    assert_eq!(stored.last_name(), author.last_name());
    assert!(stored.created().is_some());
    assert!(!author.values_changed());
    Ok(())
}

#[tokio::test]
async fn prepare_update_does_not_execute() -> RecordResult<()> {
    let client = connect_or_skip!("prepare_update_does_not_execute");

    let mut author = new_author(&client, "foo").await?;
    let id = author.id().expect("generated id");
    author.set_first_name(Some("bar".to_string()));

    let update = prepare_update(&author)?;
    assert_eq!(
        update.to_sql(),
        r#"UPDATE "pgrecord_test"."author" SET "first_name" = $1 WHERE "pgrecord_test"."author"."id" = $2"#
    );
    let binds: Vec<String> = update.bind_values().iter().map(|p| p.to_literal()).collect();
    assert_eq!(binds, vec!["'bar'".to_string(), id.to_string()]);

    let stored = find_author(&client, id).await?;
    assert_eq!(stored.first_name(), &Some("foo".to_string()));
    Ok(())
}

#[tokio::test]
async fn update_writes_and_marks_clean() -> RecordResult<()> {
    let client = connect_or_skip!("update_writes_and_marks_clean");

    let mut author = new_author(&client, "foo").await?;
    let id = author.id().expect("generated id");
    author.set_first_name(Some("baz".to_string()));

    assert_eq!(update(&client, &mut author).await?, 1);
    assert!(!author.is_touched());
    assert_eq!(author.first_name.original(), &Some("baz".to_string()));

    let stored = find_author(&client, id).await?;
    assert_eq!(stored.first_name(), &Some("baz".to_string()));
    assert_eq!(stored.last_name(), author.last_name());
    Ok(())
}

#[tokio::test]
async fn update_of_a_missing_row_keeps_changes() -> RecordResult<()> {
    let client = connect_or_skip!("update_of_a_missing_row_keeps_changes");

    let mut author = new_author(&client, "foo").await?;
    let id = author.id().expect("generated id");
    let mut delete = sql(r#"DELETE FROM "pgrecord_test"."author" WHERE id = "#);
    delete.push_bind(id);
    assert_eq!(delete.execute(&client).await?, 1);

    author.set_first_name(Some("changed".to_string()));
    assert_eq!(update(&client, &mut author).await?, 0);
    assert!(author.is_touched());
    assert!(author.values_changed());
    assert_eq!(author.first_name.original(), &Some("foo".to_string()));

    assert_eq!(update_if_changed(&client, &mut author).await?, Some(0));
    Ok(())
}

#[tokio::test]
async fn update_if_changed_runs_once() -> RecordResult<()> {
    let client = connect_or_skip!("update_if_changed_runs_once");

    let mut author = new_author(&client, "foo").await?;
    author.set_first_name(Some("baz".to_string()));

    assert_eq!(update_if_changed(&client, &mut author).await?, Some(1));
    assert_eq!(update_if_changed(&client, &mut author).await?, None);
    Ok(())
}

#[tokio::test]
async fn update_if_changed_skips_no_op_writes() -> RecordResult<()> {
    let client = connect_or_skip!("update_if_changed_skips_no_op_writes");

    let mut author = new_author(&client, "foo").await?;
    assert_eq!(update_if_changed(&client, &mut author).await?, None);

    author.set_first_name(Some("foo".to_string()));
    assert_eq!(update_if_changed(&client, &mut author).await?, None);
    Ok(())
}

#[tokio::test]
async fn update_follows_a_primary_key_change() -> RecordResult<()> {
    let client = connect_or_skip!("update_follows_a_primary_key_change");

    let mut author = new_author(&client, "a").await?;
    let old_id = author.id().expect("generated id");
    let new_id = unique_id();
    author.set_id(Some(new_id));
    author.set_first_name(Some("b".to_string()));

    assert_eq!(update(&client, &mut author).await?, 1);

    let moved = find_author(&client, new_id).await?;
    assert_eq!(moved.first_name(), &Some("b".to_string()));
    let old: Option<Author> = select_from(Author::TABLE)
        .and_where(Author::ID.eq(old_id))
        .fetch_opt_as(&client)
        .await?;
    assert!(old.is_none());
    Ok(())
}

#[tokio::test]
async fn update_without_changes_is_rejected_before_the_database() -> RecordResult<()> {
    let client = connect_or_skip!("update_without_changes_is_rejected_before_the_database");

    let mut author = new_author(&client, "foo").await?;
    let err = update(&client, &mut author).await.unwrap_err();
    assert!(matches!(err, RecordError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn upsert_inserts_then_updates() -> RecordResult<()> {
    let client = connect_or_skip!("upsert_inserts_then_updates");

    let id = unique_id();
    let last_name = unique("upsert");

    let first: Author = upsert_with(&client, |a: &mut Author| {
        a.set_id(Some(id));
        a.set_first_name(Some("one".to_string()));
        a.set_last_name(last_name.clone());
    })
    .await?;
    assert_eq!(first.id(), &Some(id));
    assert_eq!(first.first_name(), &Some("one".to_string()));

    let mut second = Author::default();
    second.set_id(Some(id));
    second.set_first_name(Some("two".to_string()));
    second.set_last_name(last_name.clone());
    let stored = upsert(&client, &second).await?;

    assert_eq!(stored.id(), &Some(id));
    assert_eq!(stored.first_name(), &Some("two".to_string()));
    assert_eq!(count_authors_named(&client, &last_name).await?, 1);
    Ok(())
}

#[tokio::test]
async fn upsert_without_values_is_rejected() -> RecordResult<()> {
    let client = connect_or_skip!("upsert_without_values_is_rejected");

    let err = upsert(&client, &Author::default()).await.unwrap_err();
    assert!(matches!(err, RecordError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn fetch_first_value_variants() -> RecordResult<()> {
    let client = connect_or_skip!("fetch_first_value_variants");

    let author = new_author(&client, "foo").await?;
    let id = author.id().expect("generated id");

    let name: Option<String> = select([Author::FIRST_NAME])
        .from(Author::TABLE)
        .and_where(Author::ID.eq(id))
        .fetch_first_value(&client)
        .await?;
    assert_eq!(name.as_deref(), Some("foo"));

    let missing = select([Author::FIRST_NAME])
        .from(Author::TABLE)
        .and_where(Author::ID.eq(-1));
    let err = missing
        .fetch_first_value::<Option<String>>(&client)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        missing.fetch_first_value_opt::<Option<String>>(&client).await?,
        None
    );
    Ok(())
}

#[tokio::test]
async fn fetch_first_value_takes_the_first_of_several_rows() -> RecordResult<()> {
    let client = connect_or_skip!("fetch_first_value_takes_the_first_of_several_rows");

    let a = new_author(&client, "first").await?;
    let b = new_author(&client, "second").await?;
    let ids = vec![a.id().expect("id"), b.id().expect("id")];

    let query = select([Author::FIRST_NAME])
        .from(Author::TABLE)
        .and_where(Author::ID.contained_in(ids)?)
        .order_by(Author::ID, Order::Desc);

    let name: Option<String> = query.fetch_first_value(&client).await?;
    assert_eq!(name.as_deref(), Some("second"));
    let name = query.fetch_first_value_opt::<Option<String>>(&client).await?;
    assert_eq!(name, Some(Some("second".to_string())));
    Ok(())
}

#[tokio::test]
async fn fetch_lists_and_mapped_rows() -> RecordResult<()> {
    let client = connect_or_skip!("fetch_lists_and_mapped_rows");

    let a = new_author(&client, "first").await?;
    let b = new_author(&client, "second").await?;
    let ids = vec![a.id().expect("id"), b.id().expect("id")];

    let query = select([Author::ID.expr(), Author::FIRST_NAME.expr()])
        .from(Author::TABLE)
        .and_where(Author::ID.contained_in(ids.clone())?)
        .order_by(Author::ID, Order::Asc);

    let found: Vec<i32> = select([Author::ID])
        .from(Author::TABLE)
        .and_where(Author::ID.contained_in(ids.clone())?)
        .order_by(Author::ID, Order::Asc)
        .fetch_first_values(&client)
        .await?;
    assert_eq!(found, ids);

    let names: Vec<AuthorName> = query.fetch_all_as(&client).await?;
    assert_eq!(
        names,
        vec![
            AuthorName {
                id: ids[0],
                name: Some("first".to_string())
            },
            AuthorName {
                id: ids[1],
                name: Some("second".to_string())
            },
        ]
    );

    let streamed: Vec<AuthorName> = query.stream_as(&client).await?.try_collect().await?;
    assert_eq!(streamed, names);

    // A second stream re-runs the statement.
    let again: Vec<AuthorName> = query.stream_as(&client).await?.try_collect().await?;
    assert_eq!(again.len(), 2);
    Ok(())
}

#[tokio::test]
async fn missing_column_is_a_decode_error() -> RecordResult<()> {
    let client = connect_or_skip!("missing_column_is_a_decode_error");

    let err = sql("SELECT 1 AS id")
        .fetch_one_as::<AuthorName>(&client)
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::Decode { ref column, .. } if column == "first_name"));
    Ok(())
}

#[tokio::test]
async fn regexp_matches_returns_text_arrays() -> RecordResult<()> {
    let client = connect_or_skip!("regexp_matches_returns_text_arrays");

    let author = new_author(&client, "foobarbequebazilbarfbonk").await?;
    let id = author.id().expect("generated id");

    let matches: Vec<Vec<String>> = select([Author::FIRST_NAME
        .expr()
        .regexp_matches("(b[^b]+)(b[^b]+)", "g")])
    .from(Author::TABLE)
    .and_where(Author::ID.eq(id))
    .fetch_first_values(&client)
    .await?;
    assert_eq!(
        matches,
        vec![
            vec!["bar".to_string(), "beque".to_string()],
            vec!["bazil".to_string(), "barf".to_string()],
        ]
    );

    let none: Vec<Vec<String>> = select([Author::FIRST_NAME.expr().regexp_matches("ping", "g")])
        .from(Author::TABLE)
        .and_where(Author::ID.eq(id))
        .fetch_first_values(&client)
        .await?;
    assert!(none.is_empty());
    Ok(())
}

#[tokio::test]
async fn cast_and_interval_helpers_run() -> RecordResult<()> {
    let client = connect_or_skip!("cast_and_interval_helpers_run");

    let author = new_author(&client, "foo").await?;
    let book: Book = create(&client, |b: &mut Book| {
        b.set_title(Some(unique("book")));
        b.set_pages(Some(42));
        b.set_author(*author.id());
    })
    .await?;
    let book_id = book.id().expect("generated id");

    let found: Option<i32> = select([Book::ID])
        .from(Book::TABLE)
        .and_where(Book::PAGES.expr().cast_as::<i64>().eq(42_i64))
        .and_where(Book::ID.eq(book_id))
        .fetch_first_value_opt(&client)
        .await?;
    assert_eq!(found, Some(book_id));

    let later: bool = select([Author::CREATED
        .expr()
        .plus_days(1)
        .gt(Author::CREATED.expr().minus_months(1))])
    .from(Author::TABLE)
    .and_where(Author::ID.eq(author.id().expect("generated id")))
    .fetch_first_value(&client)
    .await?;
    assert!(later);
    Ok(())
}

#[tokio::test]
async fn epoch_timestamp_round_trips() -> RecordResult<()> {
    let client = connect_or_skip!("epoch_timestamp_round_trips");

    let instant = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
    let ts: chrono::DateTime<Utc> = select([Expr::epoch_timestamp(instant)])
        .fetch_first_value(&client)
        .await?;
    assert_eq!(ts, instant);
    Ok(())
}

#[tokio::test]
async fn empty_array_literal_is_accepted() -> RecordResult<()> {
    let client = connect_or_skip!("empty_array_literal_is_accepted");

    let differs: bool = select([Expr::value(vec![1_i32])
        .cast_as::<Vec<i32>>()
        .ne(Expr::literal(Vec::<i32>::new()))])
    .fetch_first_value(&client)
    .await?;
    assert!(differs);

    let empty: Vec<i32> = select([Expr::literal(Vec::<i32>::new()).cast_as::<Vec<i32>>()])
        .fetch_first_value(&client)
        .await?;
    assert!(empty.is_empty());
    Ok(())
}

#[tokio::test]
async fn mutators_run_inside_a_caller_transaction() -> RecordResult<()> {
    let mut client = connect_or_skip!("mutators_run_inside_a_caller_transaction");

    let last_name = unique("tx");
    let tx = client.transaction().await?;
    let author: Author = create(&tx, |a: &mut Author| a.set_last_name(last_name.clone())).await?;
    assert!(author.id().is_some());
    tx.rollback().await?;

    assert_eq!(count_authors_named(&client, &last_name).await?, 0);
    Ok(())
}

#[tokio::test]
async fn store_errors_pass_through() -> RecordResult<()> {
    let client = connect_or_skip!("store_errors_pass_through");

    let author = new_author(&client, "foo").await?;
    let duplicate = InsertStatement::new(Author::TABLE)
        .set("id", author.id().expect("generated id"))
        .set("last_name", unique("dup"));
    let err = duplicate.execute(&client).await.unwrap_err();
    assert!(err.is_unique_violation());
    assert!(matches!(err, RecordError::Query(_)));
    Ok(())
}

#[cfg(feature = "pool")]
#[tokio::test]
async fn pooled_clients_work_with_mutators() -> RecordResult<()> {
    if try_connect().await.is_none() {
        eprintln!("DATABASE_URL is not set; skipping pooled_clients_work_with_mutators");
        return Ok(());
    }

    let pool = PoolConfig::from_env()?.create_pool()?;
    let client = pool.get().await?;

    let mut author = Author::default();
    author.set_last_name(unique("pooled"));
    insert_and_refresh(&client, &mut author).await?;
    author.set_first_name(Some("pooled".to_string()));
    assert_eq!(update_if_changed(&client, &mut author).await?, Some(1));
    Ok(())
}
