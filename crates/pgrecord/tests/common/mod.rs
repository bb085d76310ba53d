//! Records and database setup shared by the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use pgrecord::{FromRow, Record, RecordResult, Tracked};
use tokio_postgres::NoTls;

#[derive(Debug, Clone, Default, Record)]
#[orm(table = "author", schema = "pgrecord_test")]
pub struct Author {
    #[orm(id)]
    pub id: Tracked<Option<i32>>,
    pub first_name: Tracked<Option<String>>,
    pub last_name: Tracked<String>,
    pub created: Tracked<Option<DateTime<Utc>>>,
}

#[derive(Debug, Clone, Default, Record)]
#[orm(table = "book", schema = "pgrecord_test")]
pub struct Book {
    #[orm(id)]
    pub id: Tracked<Option<i32>>,
    pub title: Tracked<Option<String>>,
    pub pages: Tracked<Option<i32>>,
    #[orm(column = "author_id")]
    pub author: Tracked<Option<i32>>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AuthorName {
    pub id: i32,
    #[orm(column = "first_name")]
    pub name: Option<String>,
}

const SCHEMA: &str = r#"
BEGIN;
SELECT pg_advisory_xact_lock(7301001);
CREATE SCHEMA IF NOT EXISTS pgrecord_test;
CREATE TABLE IF NOT EXISTS pgrecord_test.author (
    id SERIAL PRIMARY KEY,
    first_name TEXT,
    last_name TEXT NOT NULL,
    created TIMESTAMPTZ DEFAULT now()
);
CREATE TABLE IF NOT EXISTS pgrecord_test.book (
    id SERIAL PRIMARY KEY,
    title TEXT,
    pages INTEGER,
    author_id INTEGER REFERENCES pgrecord_test.author (id)
);
COMMIT;
"#;

/// Connect to `DATABASE_URL` (a `.env` file is honored) and make sure the
/// test schema exists. `None` when no database is configured.
pub async fn try_connect() -> Option<tokio_postgres::Client> {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").ok()?;
    let (client, connection) = tokio_postgres::connect(&database_url, NoTls)
        .await
        .expect("Failed to connect to DATABASE_URL with NoTls");
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            eprintln!("tokio-postgres connection error: {e}");
        }
    });
    client
        .batch_execute(SCHEMA)
        .await
        .expect("Failed to create test schema");
    Some(client)
}

/// A value no other test run will produce.
pub fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}

/// A primary key far above anything the SERIAL sequence hands out.
pub fn unique_id() -> i32 {
    1_000_000_000 + (uuid::Uuid::new_v4().as_u128() % 1_000_000_000) as i32
}

pub async fn count_authors_named(
    client: &tokio_postgres::Client,
    last_name: &str,
) -> RecordResult<i64> {
    use pgrecord::{StatementExt, select};

    select([pgrecord::Expr::raw("COUNT(*)")])
        .from(Author::TABLE)
        .and_where(Author::LAST_NAME.eq(last_name.to_string()))
        .fetch_first_value(client)
        .await
}
