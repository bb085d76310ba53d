use super::*;
use crate::error::RecordError;
use crate::record::Record;
use crate::testing::{Book, LogLine, Membership};

fn literals(values: Vec<Param>) -> Vec<String> {
    values.iter().map(Param::to_literal).collect()
}

#[test]
fn insert_binds_touched_fields_only() {
    let mut book = Book::default();
    book.title.set(Some("foo".to_string()));
    book.pages.set(Some(123));

    let insert = prepare_insert(&book);
    assert_eq!(
        insert.to_sql(),
        r#"INSERT INTO "test"."book" ("title", "pages") VALUES ($1, $2)"#
    );
    assert_eq!(literals(insert.bind_values()), vec!["'foo'", "123"]);
    assert_eq!(
        insert.to_inlined_sql(),
        r#"INSERT INTO "test"."book" ("title", "pages") VALUES ('foo', 123)"#
    );
}

#[test]
fn insert_without_touched_fields_uses_defaults() {
    let insert = prepare_insert(&Book::default());
    assert!(insert.is_empty());
    assert_eq!(insert.to_sql(), r#"INSERT INTO "test"."book" DEFAULT VALUES"#);
    assert!(insert.validate().is_ok());
}

#[test]
fn insert_with_returning() {
    let mut book = Book::default();
    book.title.set(None);
    let insert = prepare_insert(&book).returning_all();
    assert_eq!(
        insert.to_inlined_sql(),
        r#"INSERT INTO "test"."book" ("title") VALUES (NULL) RETURNING *"#
    );
}

#[test]
fn upsert_repeats_values_in_update_branch() {
    let mut book = Book::loaded(7, "foo", 10);
    book.id.set(Some(7));
    book.title.set(Some("bar".to_string()));

    let insert = prepare_insert(&book)
        .on_conflict(&["id"], ConflictAction::DoUpdate)
        .returning_all();
    assert_eq!(
        insert.to_sql(),
        r#"INSERT INTO "test"."book" ("id", "title") VALUES ($1, $2) ON CONFLICT ("id") DO UPDATE SET "id" = $3, "title" = $4 RETURNING *"#
    );
    assert_eq!(literals(insert.bind_values()), vec!["7", "'bar'", "7", "'bar'"]);
    assert!(insert.validate().is_ok());
}

#[test]
fn conflict_do_nothing() {
    let insert = InsertStatement::new(Book::TABLE)
        .set("title", "x")
        .on_conflict(&["id"], ConflictAction::DoNothing);
    assert_eq!(
        insert.to_sql(),
        r#"INSERT INTO "test"."book" ("title") VALUES ($1) ON CONFLICT ("id") DO NOTHING"#
    );
}

#[test]
fn conflict_do_update_requires_values_and_target() {
    let insert = InsertStatement::new(Book::TABLE).on_conflict(&["id"], ConflictAction::DoUpdate);
    assert!(matches!(insert.validate(), Err(RecordError::Validation(_))));

    let insert = InsertStatement::new(Book::TABLE)
        .set("title", "x")
        .on_conflict(&[], ConflictAction::DoUpdate);
    assert!(matches!(insert.validate(), Err(RecordError::Validation(_))));
}

#[test]
fn update_filters_by_primary_key() {
    let mut book = Book::loaded(3, "foo", 10);
    book.title.set(Some("bar".to_string()));

    let update = prepare_update(&book).unwrap();
    assert_eq!(
        update.to_sql(),
        r#"UPDATE "test"."book" SET "title" = $1 WHERE "test"."book"."id" = $2"#
    );
    assert_eq!(literals(update.bind_values()), vec!["'bar'", "3"]);
}

#[test]
fn update_uses_original_key_after_key_change() {
    let mut book = Book::loaded(7, "a", 10);
    book.title.set(Some("b".to_string()));
    book.id.set(Some(8));

    let update = prepare_update(&book).unwrap();
    assert_eq!(
        update.to_inlined_sql(),
        r#"UPDATE "test"."book" SET "id" = 8, "title" = 'b' WHERE "test"."book"."id" = 7"#
    );
}

#[test]
fn update_with_null_key_uses_is_null() {
    let mut membership = Membership {
        group_id: 4.into(),
        member: None.into(),
        role: "reader".to_string().into(),
    };
    membership.role.set("admin".to_string());

    let update = prepare_update(&membership).unwrap();
    assert_eq!(
        update.to_inlined_sql(),
        r#"UPDATE "test"."membership" SET "role" = 'admin' WHERE "test"."membership"."group_id" = 4 AND "test"."membership"."member" IS NULL"#
    );
}

#[test]
fn update_without_primary_key_fails() {
    let mut line = LogLine::default();
    line.message.set("hello".to_string());
    let err = prepare_update(&line).unwrap_err();
    assert!(matches!(err, RecordError::MissingPrimaryKey(_)));
}

#[test]
fn update_without_touched_fields_fails_validation() {
    let book = Book::loaded(1, "foo", 10);
    let update = prepare_update(&book).unwrap();
    assert!(update.is_empty());
    let err = update.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation error: UPDATE requires at least one SET column"
    );
}

#[test]
fn select_renders_all_clauses() {
    let title = Book::TABLE.column(1).unwrap();
    let pages = Book::TABLE.column(2).unwrap();

    let query = select([title])
        .from(Book::TABLE)
        .and_where(pages.gt(100))
        .and_where(title.is_not_null())
        .order_by(pages, Order::Desc)
        .limit(5)
        .offset(10);
    assert_eq!(
        query.to_sql(),
        r#"SELECT "test"."book"."title" FROM "test"."book" WHERE "test"."book"."pages" > $1 AND "test"."book"."title" IS NOT NULL ORDER BY "test"."book"."pages" DESC LIMIT 5 OFFSET 10"#
    );
}

#[test]
fn select_from_selects_everything() {
    assert_eq!(
        select_from(Book::TABLE).to_sql(),
        r#"SELECT * FROM "test"."book""#
    );
}

#[test]
fn sql_is_a_statement() {
    let mut q = crate::sql::sql("SELECT ");
    q.push_bind(1_i32);
    assert_eq!(Statement::to_sql(&q), "SELECT $1");
    assert_eq!(Statement::to_inlined_sql(&q), "SELECT 1");
}
