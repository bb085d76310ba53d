//! Convenient imports for typical `pgrecord` usage.
//!
//! ```ignore
//! use pgrecord::prelude::*;
//! ```

pub use crate::{
    Column, Condition, ConflictAction, Expr, FromRow, GenericClient, Order, Record, RecordError,
    RecordResult, RowExt, Sql, Statement, StatementExt, StreamingClient, Table, Tracked, create,
    insert_and_refresh, prepare_insert, prepare_update, select, select_from, sql, update,
    update_if_changed, upsert, upsert_with, values_changed,
};

#[cfg(feature = "pool")]
pub use crate::{PoolConfig, create_pool, create_pool_with_config};
