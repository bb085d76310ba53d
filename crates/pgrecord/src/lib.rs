//! # pgrecord
//!
//! Change-tracked records and statement helpers for PostgreSQL on top of
//! `tokio-postgres`.
//!
//! ## Features
//!
//! - **Records**: structs of [`Tracked`] fields, derived with `#[derive(Record)]`
//! - **Real change detection**: [`values_changed`] ignores writes of an equal value
//! - **Statement builders**: [`prepare_insert`] / [`prepare_update`] from a record,
//!   plus [`select`] and the [`Sql`] fragment builder
//! - **Fetch helpers**: first value, mapped rows and row streams via [`StatementExt`]
//! - **Mutators**: [`create`], [`update`], [`update_if_changed`],
//!   [`insert_and_refresh`], [`upsert`]
//! - **Expressions**: interval arithmetic, `regexp_matches`, inlined IN-lists,
//!   casts and `TO_TIMESTAMP`
//! - **Transaction-friendly**: pass a transaction anywhere a [`GenericClient`] is expected
//!
//! ```ignore
//! use pgrecord::prelude::*;
//!
//! #[derive(Debug, Clone, Default, Record)]
//! #[orm(table = "author", schema = "test")]
//! struct Author {
//!     #[orm(id)]
//!     id: Tracked<Option<i32>>,
//!     first_name: Tracked<Option<String>>,
//!     last_name: Tracked<String>,
//! }
//!
//! let mut author: Author = create(&client, |a: &mut Author| {
//!     a.set_first_name(Some("foo".into()));
//!     a.set_last_name("bar".into());
//! })
//! .await?;
//!
//! author.set_first_name(Some("foo".into()));
//! assert_eq!(update_if_changed(&client, &mut author).await?, None);
//!
//! author.set_first_name(Some("baz".into()));
//! assert_eq!(update_if_changed(&client, &mut author).await?, Some(1));
//! ```

extern crate self as pgrecord;

pub mod client;
pub mod error;
pub mod execute;
pub mod expr;
pub mod ident;
pub mod logging;
pub mod record;
pub mod row;
pub mod sql;
pub mod statement;
pub mod value;

#[cfg(feature = "pool")]
pub mod pool;

pub mod prelude;

#[cfg(test)]
mod testing;

pub use client::{GenericClient, RowStream, StreamingClient};
pub use error::{RecordError, RecordResult};
pub use execute::{
    FromRowStream, StatementExt, create, insert_and_refresh, update, update_if_changed, upsert,
    upsert_with,
};
pub use expr::{Column, Condition, Expr};
pub use logging::{trace_query, trace_sql};
pub use record::{FieldState, Record, Table, Tracked, values_changed};
pub use row::{FromRow, PgType, RowExt};
pub use sql::{Sql, sql};
pub use statement::{
    ConflictAction, InsertStatement, Order, SelectStatement, Statement, UpdateStatement,
    prepare_insert, prepare_update, select, select_from,
};
pub use value::{Param, SqlValue};

#[cfg(feature = "pool")]
pub use pool::{PoolConfig, create_pool, create_pool_with_config, create_pool_with_tls};

// Re-export derive macros
#[cfg(feature = "derive")]
pub use pgrecord_derive::{FromRow, Record};

// Re-export the driver so generated code can name its types.
pub use tokio_postgres;
