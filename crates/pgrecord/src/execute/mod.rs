//! Statement execution and record mutators.

mod bridge;
mod mutators;

pub use bridge::{FromRowStream, StatementExt};
pub use mutators::{create, insert_and_refresh, update, update_if_changed, upsert, upsert_with};
